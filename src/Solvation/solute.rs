//! # Solute Module
//!
//! ## Purpose
//! Owns everything the analyses need about one solute species: the system invariants
//! delivered by the trajectory provider (`SolventSystem`), the atom type lookup, the
//! configuration, the solvation data once it exists, and the analyses computed from it.
//!
//! ## Usage Pattern
//! `Solute::new` -> `Solute::run(solvation_data)` -> read `coordination`, `pairing`,
//! `speciation`, `networking`. Each analysis can also be built on its own with
//! `from_solute`, which fails with `NotRun` before `run` was called.

use crate::Solvation::coordination::Coordination;
use crate::Solvation::networking::Networking;
use crate::Solvation::pairing::Pairing;
use crate::Solvation::solvation_data::SolvationData;
use crate::Solvation::solvation_errors::SolvationError;
use crate::Solvation::speciation::Speciation;
use crate::settings::{AnalysisClass, AnalysisConfig};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// lookup of a solvent atom index -> atom type label
pub trait AtomTypeLookup {
    fn atom_type(&self, atom_ix: usize) -> Option<&str>;
}

impl AtomTypeLookup for HashMap<usize, String> {
    fn atom_type(&self, atom_ix: usize) -> Option<&str> {
        self.get(&atom_ix).map(|s| s.as_str())
    }
}

impl AtomTypeLookup for BTreeMap<usize, String> {
    fn atom_type(&self, atom_ix: usize) -> Option<&str> {
        self.get(&atom_ix).map(|s| s.as_str())
    }
}

/// the atom index is the position in the vector
impl AtomTypeLookup for Vec<String> {
    fn atom_type(&self, atom_ix: usize) -> Option<&str> {
        self.get(atom_ix).map(|s| s.as_str())
    }
}

/// invariants of the simulated system, used as normalization denominators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolventSystem {
    pub n_frames: usize,
    pub n_solutes: usize,
    /// total number of residues of each solvent species
    pub solvent_counts: HashMap<String, usize>,
}

impl SolventSystem {
    pub fn new(
        n_frames: usize,
        n_solutes: usize,
        solvent_counts: HashMap<String, usize>,
    ) -> Result<Self, SolvationError> {
        let system = Self {
            n_frames,
            n_solutes,
            solvent_counts,
        };
        system.validate()?;
        Ok(system)
    }

    pub fn validate(&self) -> Result<(), SolvationError> {
        if self.n_frames == 0 {
            return Err(SolvationError::NoFrames);
        }
        if self.n_solutes == 0 {
            return Err(SolvationError::NoSolutes);
        }
        Ok(())
    }
}

/// one solute species and its solvation analyses
pub struct Solute {
    pub name: String,
    pub system: SolventSystem,
    pub config: AnalysisConfig,
    atom_types: Box<dyn AtomTypeLookup>,
    solvation_data: Option<SolvationData>,
    pub coordination: Option<Coordination>,
    pub pairing: Option<Pairing>,
    pub speciation: Option<Speciation>,
    pub networking: Option<Networking>,
}

impl Solute {
    pub fn new(
        name: &str,
        system: SolventSystem,
        atom_types: Box<dyn AtomTypeLookup>,
        config: AnalysisConfig,
    ) -> Result<Self, SolvationError> {
        system.validate()?;
        config.validate()?;
        // network solvents must be species of the system
        if let Some(unknown) = config
            .network_solvents
            .iter()
            .flatten()
            .find(|solvent| !system.solvent_counts.contains_key(*solvent))
        {
            return Err(SolvationError::UnknownSolvent(unknown.clone()));
        }
        Ok(Self {
            name: name.to_string(),
            system,
            config,
            atom_types,
            solvation_data: None,
            coordination: None,
            pairing: None,
            speciation: None,
            networking: None,
        })
    }

    /// Stores the solvation data and computes the analyses enabled in the configuration.
    ///
    /// The data is checked against the system before anything is computed, and nothing
    /// is stored unless every enabled analysis succeeds.
    pub fn run(&mut self, solvation_data: SolvationData) -> Result<(), SolvationError> {
        solvation_data.check_universe(self.system.n_frames, self.system.n_solutes)?;
        solvation_data.check_populations(&self.system.solvent_counts)?;
        let previous = self.solvation_data.replace(solvation_data);

        match self.compute_analyses() {
            Ok((coordination, pairing, speciation, networking)) => {
                self.coordination = coordination;
                self.pairing = pairing;
                self.speciation = speciation;
                self.networking = networking;
                info!(
                    "solute '{}' analysed: {:?}",
                    self.name, self.config.analysis_classes
                );
                Ok(())
            }
            Err(e) => {
                self.solvation_data = previous;
                Err(e)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn compute_analyses(
        &self,
    ) -> Result<
        (
            Option<Coordination>,
            Option<Pairing>,
            Option<Speciation>,
            Option<Networking>,
        ),
        SolvationError,
    > {
        let coordination = if self.config.enabled(AnalysisClass::Coordination) {
            Some(Coordination::from_solute(self)?)
        } else {
            None
        };
        let pairing = if self.config.enabled(AnalysisClass::Pairing) {
            Some(Pairing::from_solute(self)?)
        } else {
            None
        };
        let speciation = if self.config.enabled(AnalysisClass::Speciation) {
            Some(Speciation::from_solute(self)?)
        } else {
            None
        };
        let networking = if self.config.enabled(AnalysisClass::Networking) {
            Some(Networking::from_solute(self)?)
        } else {
            None
        };
        Ok((coordination, pairing, speciation, networking))
    }

    pub fn has_run(&self) -> bool {
        self.solvation_data.is_some()
    }

    pub fn solvation_data(&self) -> Result<&SolvationData, SolvationError> {
        self.solvation_data
            .as_ref()
            .ok_or_else(|| SolvationError::NotRun(self.name.clone()))
    }

    pub fn atom_types(&self) -> &dyn AtomTypeLookup {
        self.atom_types.as_ref()
    }

    /////////////////////////////////ACCESS TO COMPUTED ANALYSES///////////////////////////////////////////
    pub fn get_coordination(&self) -> Result<&Coordination, SolvationError> {
        self.coordination
            .as_ref()
            .ok_or_else(|| self.not_computed(AnalysisClass::Coordination))
    }

    pub fn get_pairing(&self) -> Result<&Pairing, SolvationError> {
        self.pairing
            .as_ref()
            .ok_or_else(|| self.not_computed(AnalysisClass::Pairing))
    }

    pub fn get_speciation(&self) -> Result<&Speciation, SolvationError> {
        self.speciation
            .as_ref()
            .ok_or_else(|| self.not_computed(AnalysisClass::Speciation))
    }

    pub fn get_networking(&self) -> Result<&Networking, SolvationError> {
        self.networking
            .as_ref()
            .ok_or_else(|| self.not_computed(AnalysisClass::Networking))
    }

    fn not_computed(&self, analysis: AnalysisClass) -> SolvationError {
        if !self.has_run() {
            return SolvationError::NotRun(self.name.clone());
        }
        SolvationError::AnalysisNotComputed {
            solute: self.name.clone(),
            analysis: analysis.as_str().to_string(),
        }
    }
}
