//! # Coordination Module
//!
//! ## Purpose
//! Computes **species-species** coordination numbers: if the coordination number of
//! a solvent is 3.2, there are on average 3.2 coordinating events of that solvent
//! within the solvation cutoff of each solute. This is equivalent to integrating the
//! solute-solvent RDF up to the cutoff.
//!
//! The count is taken over raw events (rows of the solvation table), not over
//! distinct residues, so a residue with two atoms inside the cutoff counts twice.
//! Pairing and Speciation count distinct residues instead.
//!
//! The module also reports which atom types of each solvent actually coordinate.

use crate::Solvation::solute::{AtomTypeLookup, Solute};
use crate::Solvation::solvation_data::{FrameTable, SolvationData};
use crate::Solvation::solvation_errors::SolvationError;
use log::info;
use std::collections::{BTreeMap, HashMap};

/// default cutoff below which an atom type is considered a negligible contributor
pub const DEFAULT_COORDINATION_TOLERANCE: f64 = 0.005;

#[derive(Debug, Clone)]
pub struct Coordination {
    pub n_frames: usize,
    pub n_solutes: usize,
    /// mean coordination number per solvent
    pub cn_dict: HashMap<String, f64>,
    /// coordination number per frame and solvent
    pub cn_by_frame: FrameTable<f64>,
    /// atom_type -> solvent -> fraction of the coordinating atoms of that solvent having that type
    pub coordinating_atoms: BTreeMap<String, BTreeMap<String, f64>>,
    pub tolerance: f64,
}

impl Coordination {
    /// # Arguments
    /// * `solvation_data` - event table
    /// * `n_frames`, `n_solutes` - normalization denominators
    /// * `atom_types` - lookup of solvent atom index -> atom type label
    /// * `tolerance` - atom types with a smaller fraction are dropped
    pub fn new(
        solvation_data: &SolvationData,
        n_frames: usize,
        n_solutes: usize,
        atom_types: &dyn AtomTypeLookup,
        tolerance: f64,
    ) -> Result<Self, SolvationError> {
        if !(0.0..1.0).contains(&tolerance) {
            return Err(SolvationError::InvalidTolerance(tolerance));
        }
        solvation_data.check_universe(n_frames, n_solutes)?;
        let (cn_dict, cn_by_frame) = mean_cn(solvation_data, n_frames, n_solutes);
        let coordinating_atoms = coordinating_atoms(solvation_data, atom_types, tolerance)?;
        info!(
            "coordination numbers computed for {} solvents over {} frames",
            cn_dict.len(),
            n_frames
        );
        Ok(Self {
            n_frames,
            n_solutes,
            cn_dict,
            cn_by_frame,
            coordinating_atoms,
            tolerance,
        })
    }

    /// builds the analysis from a solute that has been run
    pub fn from_solute(solute: &Solute) -> Result<Self, SolvationError> {
        let solvation_data = solute.solvation_data()?;
        Self::new(
            solvation_data,
            solute.system.n_frames,
            solute.system.n_solutes,
            solute.atom_types(),
            solute.config.coordination_tolerance,
        )
    }

    /// coordination number of one solvent in one frame
    pub fn cn_in_frame(&self, frame: usize, solvent: &str) -> Option<f64> {
        self.cn_by_frame.get(frame, solvent)
    }

    /// all (solvent, fraction) pairs for an atom type
    pub fn atom_type_fractions(&self, atom_type: &str) -> Option<&BTreeMap<String, f64>> {
        self.coordinating_atoms.get(atom_type)
    }
}

/// events per (frame, solute, solvent) summed over solutes, divided by n_solutes per frame;
/// the scalar is the per-frame series averaged over all n_frames
fn mean_cn(
    solvation_data: &SolvationData,
    n_frames: usize,
    n_solutes: usize,
) -> (HashMap<String, f64>, FrameTable<f64>) {
    let mut events_by_frame: BTreeMap<(usize, &str), usize> = BTreeMap::new();
    for ((frame, _solute, solvent), count) in solvation_data.events_per_shell() {
        *events_by_frame.entry((frame, solvent)).or_insert(0) += count;
    }
    let mut cn_by_frame = FrameTable::zeros(solvation_data.frames(), solvation_data.solvent_names());
    for ((frame, solvent), events) in &events_by_frame {
        cn_by_frame.set(*frame, solvent, *events as f64 / n_solutes as f64);
    }
    let cn_dict = cn_by_frame
        .column_sums()
        .into_iter()
        .map(|(solvent, sum)| (solvent, sum / n_frames as f64))
        .collect();
    (cn_dict, cn_by_frame)
}

/// fraction of each atom type among all coordinating atoms of a solvent
fn coordinating_atoms(
    solvation_data: &SolvationData,
    atom_types: &dyn AtomTypeLookup,
    tolerance: f64,
) -> Result<BTreeMap<String, BTreeMap<String, f64>>, SolvationError> {
    let mut type_counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    let mut solvent_totals: HashMap<&str, usize> = HashMap::new();
    for record in solvation_data.records() {
        let atom_type = atom_types
            .atom_type(record.atom_ix)
            .ok_or(SolvationError::MissingAtomType(record.atom_ix))?;
        *type_counts
            .entry((record.solvent_name.as_str(), atom_type))
            .or_insert(0) += 1;
        *solvent_totals.entry(record.solvent_name.as_str()).or_insert(0) += 1;
    }
    let mut fractions: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for ((solvent, atom_type), count) in type_counts {
        // totals are never zero for a solvent that produced a count
        let fraction = count as f64 / solvent_totals[solvent] as f64;
        if fraction > tolerance {
            fractions
                .entry(atom_type.to_string())
                .or_default()
                .insert(solvent.to_string(), fraction);
        }
    }
    Ok(fractions)
}
