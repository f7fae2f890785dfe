//! # Solvation Data Module
//!
//! ## Purpose
//! Holds the per-frame table of solute-solvent proximity events that every statistic
//! of the crate is computed from. The table is produced once by the neighbor search
//! (which lives outside this crate) and is never mutated afterwards.
//!
//! ## Key Features
//! - **Row invariants**: non-negative distances, unique (frame, solute atom, solvent atom)
//!   rows, one solvent name per residue
//! - **Group-by reductions**: event counts and distinct residue sets keyed by tuples of
//!   grouping columns
//! - **Wide tables**: `FrameTable` reshapes a (frame, solvent) series into a dense
//!   frame x solvent matrix
//!
//! ## Counting granularity
//! One row is one solvent ATOM within the cutoff of a solute atom. A residue with two
//! atoms inside the cutoff produces two rows, so residue-level coordination is obtained by
//! counting distinct `res_ix`, while `events_per_shell` counts raw rows.

use crate::Solvation::solvation_errors::SolvationError;
use nalgebra::{DMatrix, Scalar};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// one solute-solvent proximity event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvationRecord {
    pub frame: usize,         // simulation step index
    pub solvated_atom: usize, // id of the solute atom under analysis
    pub atom_ix: usize,       // id of the coordinating solvent atom
    pub res_ix: usize,        // id of the solvent residue owning atom_ix
    pub solvent_name: String, // solvent species of the residue
    #[serde(alias = "dist")]
    pub distance: f64, // solute - solvent atom separation
}

impl SolvationRecord {
    pub fn new(
        frame: usize,
        solvated_atom: usize,
        atom_ix: usize,
        res_ix: usize,
        solvent_name: &str,
        distance: f64,
    ) -> Self {
        Self {
            frame,
            solvated_atom,
            atom_ix,
            res_ix,
            solvent_name: solvent_name.to_string(),
            distance,
        }
    }
}

/// immutable, insertion-ordered table of solvation events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolvationData {
    records: Vec<SolvationRecord>,
}

impl SolvationData {
    /// Builds the table and checks the row invariants.
    ///
    /// # Errors
    /// * `InvalidDistance` - negative, NaN or infinite distance
    /// * `DuplicateEvent` - two rows with the same (frame, solvated_atom, atom_ix)
    /// * `InconsistentResidue` - one `res_ix` labelled with two solvent names
    pub fn new(records: Vec<SolvationRecord>) -> Result<Self, SolvationError> {
        let mut seen: HashSet<(usize, usize, usize)> = HashSet::with_capacity(records.len());
        let mut residue_names: HashMap<usize, &str> = HashMap::new();
        for record in &records {
            if !record.distance.is_finite() || record.distance < 0.0 {
                return Err(SolvationError::InvalidDistance {
                    frame: record.frame,
                    solvated_atom: record.solvated_atom,
                    atom_ix: record.atom_ix,
                    distance: record.distance,
                });
            }
            if !seen.insert((record.frame, record.solvated_atom, record.atom_ix)) {
                return Err(SolvationError::DuplicateEvent {
                    frame: record.frame,
                    solvated_atom: record.solvated_atom,
                    atom_ix: record.atom_ix,
                });
            }
            match residue_names.get(&record.res_ix) {
                Some(name) if *name != record.solvent_name => {
                    return Err(SolvationError::InconsistentResidue {
                        res_ix: record.res_ix,
                        first: name.to_string(),
                        second: record.solvent_name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    residue_names.insert(record.res_ix, record.solvent_name.as_str());
                }
            }
        }
        Ok(Self { records })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SolvationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// sorted distinct frames present in the table
    pub fn frames(&self) -> Vec<usize> {
        let frames: BTreeSet<usize> = self.records.iter().map(|r| r.frame).collect();
        frames.into_iter().collect()
    }

    /// sorted distinct solvent names present in the table
    pub fn solvent_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.solvent_name.as_str())
            .collect();
        names.into_iter().map(|s| s.to_string()).collect()
    }

    /// sub-table holding only events of the given solvents, order preserved
    pub fn filter_solvents(&self, solvents: &[String]) -> SolvationData {
        let records = self
            .records
            .iter()
            .filter(|r| solvents.contains(&r.solvent_name))
            .cloned()
            .collect();
        // a subset of valid rows is valid
        SolvationData { records }
    }

    /////////////////////////////////GROUP-BY REDUCTIONS///////////////////////////////////////////
    /// number of rows per (frame, solvated_atom, solvent_name)
    pub fn events_per_shell(&self) -> BTreeMap<(usize, usize, &str), usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            *counts
                .entry((r.frame, r.solvated_atom, r.solvent_name.as_str()))
                .or_insert(0) += 1;
        }
        counts
    }

    /// distinct coordinating residues per (frame, solvated_atom, solvent_name)
    pub fn residues_per_shell(&self) -> BTreeMap<(usize, usize, &str), BTreeSet<usize>> {
        let mut residues: BTreeMap<(usize, usize, &str), BTreeSet<usize>> = BTreeMap::new();
        for r in &self.records {
            residues
                .entry((r.frame, r.solvated_atom, r.solvent_name.as_str()))
                .or_default()
                .insert(r.res_ix);
        }
        residues
    }

    /// distinct coordinated residues per (frame, solvent_name), whatever solute they coordinate
    pub fn residues_per_frame(&self) -> BTreeMap<(usize, &str), BTreeSet<usize>> {
        let mut residues: BTreeMap<(usize, &str), BTreeSet<usize>> = BTreeMap::new();
        for r in &self.records {
            residues
                .entry((r.frame, r.solvent_name.as_str()))
                .or_default()
                .insert(r.res_ix);
        }
        residues
    }

    /// distinct solute atoms with at least one event, per frame
    pub fn solutes_per_frame(&self) -> BTreeMap<usize, BTreeSet<usize>> {
        let mut solutes: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for r in &self.records {
            solutes.entry(r.frame).or_default().insert(r.solvated_atom);
        }
        solutes
    }

    /////////////////////////////////PRECONDITIONS///////////////////////////////////////////
    /// checks the table against the externally supplied frame and solute counts
    pub fn check_universe(&self, n_frames: usize, n_solutes: usize) -> Result<(), SolvationError> {
        if n_frames == 0 {
            return Err(SolvationError::NoFrames);
        }
        if n_solutes == 0 {
            return Err(SolvationError::NoSolutes);
        }
        let solutes_per_frame = self.solutes_per_frame();
        if solutes_per_frame.len() > n_frames {
            return Err(SolvationError::FrameCountMismatch {
                found: solutes_per_frame.len(),
                n_frames,
            });
        }
        for (frame, solutes) in &solutes_per_frame {
            if solutes.len() > n_solutes {
                return Err(SolvationError::SoluteCountMismatch {
                    frame: *frame,
                    found: solutes.len(),
                    n_solutes,
                });
            }
        }
        Ok(())
    }

    /// every solvent must have a population at least as large as its coordinated residue count
    pub fn check_populations(
        &self,
        solvent_counts: &HashMap<String, usize>,
    ) -> Result<(), SolvationError> {
        for ((frame, solvent), residues) in self.residues_per_frame() {
            let population = *solvent_counts
                .get(solvent)
                .ok_or_else(|| SolvationError::UnknownSolvent(solvent.to_string()))?;
            if residues.len() > population {
                return Err(SolvationError::PopulationExceeded {
                    frame,
                    solvent: solvent.to_string(),
                    coordinated: residues.len(),
                    population,
                });
            }
        }
        Ok(())
    }
}

/// dense frame x solvent table ("unstacked" series)
///
/// rows follow `frames` (sorted ascending), columns follow `solvents`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTable<T: Scalar = f64> {
    pub frames: Vec<usize>,
    pub solvents: Vec<String>,
    pub values: DMatrix<T>,
}

impl<T: Scalar + Copy + Default> FrameTable<T> {
    pub fn zeros(frames: Vec<usize>, solvents: Vec<String>) -> Self {
        let values = DMatrix::from_element(frames.len(), solvents.len(), T::default());
        Self {
            frames,
            solvents,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() || self.solvents.is_empty()
    }

    pub fn frame_position(&self, frame: usize) -> Option<usize> {
        self.frames.binary_search(&frame).ok()
    }

    pub fn solvent_position(&self, solvent: &str) -> Option<usize> {
        self.solvents.iter().position(|s| s == solvent)
    }

    pub fn get(&self, frame: usize, solvent: &str) -> Option<T> {
        let i = self.frame_position(frame)?;
        let j = self.solvent_position(solvent)?;
        Some(self.values[(i, j)])
    }

    pub(crate) fn set(&mut self, frame: usize, solvent: &str, value: T) {
        if let (Some(i), Some(j)) = (self.frame_position(frame), self.solvent_position(solvent)) {
            self.values[(i, j)] = value;
        }
    }

    /// values of one solvent over all frames
    pub fn column(&self, solvent: &str) -> Option<Vec<T>> {
        let j = self.solvent_position(solvent)?;
        Some(self.values.column(j).iter().copied().collect())
    }

    /// values of all solvents in one frame
    pub fn row(&self, frame: usize) -> Option<HashMap<String, T>> {
        let i = self.frame_position(frame)?;
        Some(
            self.solvents
                .iter()
                .enumerate()
                .map(|(j, solvent)| (solvent.clone(), self.values[(i, j)]))
                .collect(),
        )
    }
}

impl FrameTable<f64> {
    pub fn column_sums(&self) -> HashMap<String, f64> {
        self.solvents
            .iter()
            .enumerate()
            .map(|(j, solvent)| (solvent.clone(), self.values.column(j).sum()))
            .collect()
    }
}
