//! # Pairing Module
//!
//! ## Purpose
//! Tracks which fraction of solutes is paired with each solvent, which fraction of each
//! solvent is free (not coordinated to any solute) and the composition of the diluent,
//! i.e. of everything that is not coordinated.
//!
//! The pairing fraction of a solvent is the fraction of solutes coordinated with ANY
//! residue of that solvent: a pairing of 0.5 means that half of the solutes have at
//! least one such residue in their shell.

use crate::Solvation::solute::Solute;
use crate::Solvation::solvation_data::{FrameTable, SolvationData};
use crate::Solvation::solvation_errors::SolvationError;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct Pairing {
    pub n_frames: usize,
    pub n_solutes: usize,
    pub solvent_counts: HashMap<String, usize>,
    /// mean fraction of solutes paired with each solvent; a species that never
    /// coordinates has no entry here, unlike in `fraction_free_solvents`
    pub pairing_dict: HashMap<String, f64>,
    pub pairing_by_frame: FrameTable<f64>,
    /// fraction of each solvent that is not coordinated in an average frame
    pub fraction_free_solvents: HashMap<String, f64>,
    /// fraction of the diluent made of each solvent, averaged over frames
    pub diluent_dict: HashMap<String, f64>,
    pub diluent_by_frame: FrameTable<f64>,
    /// raw number of uncoordinated residues of each solvent per frame
    pub diluent_counts: FrameTable<usize>,
}

impl Pairing {
    /// # Arguments
    /// * `solvation_data` - event table
    /// * `n_frames`, `n_solutes` - normalization denominators
    /// * `solvent_counts` - total population of each solvent species
    pub fn new(
        solvation_data: &SolvationData,
        n_frames: usize,
        n_solutes: usize,
        solvent_counts: &HashMap<String, usize>,
    ) -> Result<Self, SolvationError> {
        solvation_data.check_universe(n_frames, n_solutes)?;
        solvation_data.check_populations(solvent_counts)?;
        let (pairing_dict, pairing_by_frame) =
            fraction_coordinated(solvation_data, n_frames, n_solutes);
        let fraction_free_solvents = fraction_free_solvent(solvation_data, n_frames, solvent_counts);
        let (diluent_dict, diluent_by_frame, diluent_counts) =
            diluent_composition(solvation_data, solvent_counts);
        info!(
            "pairing computed for {} solvents, diluent tracked over {} frames",
            pairing_dict.len(),
            diluent_by_frame.frames.len()
        );
        Ok(Self {
            n_frames,
            n_solutes,
            solvent_counts: solvent_counts.clone(),
            pairing_dict,
            pairing_by_frame,
            fraction_free_solvents,
            diluent_dict,
            diluent_by_frame,
            diluent_counts,
        })
    }

    pub fn from_solute(solute: &Solute) -> Result<Self, SolvationError> {
        let solvation_data = solute.solvation_data()?;
        Self::new(
            solvation_data,
            solute.system.n_frames,
            solute.system.n_solutes,
            &solute.system.solvent_counts,
        )
    }

    /// fraction of each solvent coordinated in an average frame, complement of the free fraction
    pub fn fraction_coordinated_solvents(&self) -> HashMap<String, f64> {
        self.fraction_free_solvents
            .iter()
            .filter(|(solvent, _)| self.solvent_counts.get(*solvent).copied().unwrap_or(0) > 0)
            .map(|(solvent, free)| (solvent.clone(), 1.0 - free))
            .collect()
    }
}

/// solutes with >= 1 event of a solvent, per frame over n_solutes; mean over n_frames
fn fraction_coordinated(
    solvation_data: &SolvationData,
    n_frames: usize,
    n_solutes: usize,
) -> (HashMap<String, f64>, FrameTable<f64>) {
    let mut paired: BTreeMap<(usize, &str), usize> = BTreeMap::new();
    for ((frame, _solute, solvent), events) in solvation_data.events_per_shell() {
        // any event at all makes the solute paired
        if events > 0 {
            *paired.entry((frame, solvent)).or_insert(0) += 1;
        }
    }
    let mut pairing_by_frame =
        FrameTable::zeros(solvation_data.frames(), solvation_data.solvent_names());
    for ((frame, solvent), n_paired) in &paired {
        pairing_by_frame.set(*frame, solvent, *n_paired as f64 / n_solutes as f64);
    }
    let pairing_dict = pairing_by_frame
        .column_sums()
        .into_iter()
        .map(|(solvent, sum)| (solvent, sum / n_frames as f64))
        .collect();
    (pairing_dict, pairing_by_frame)
}

/// 1 - (distinct coordinated residues per frame) / population, for every known solvent
fn fraction_free_solvent(
    solvation_data: &SolvationData,
    n_frames: usize,
    solvent_counts: &HashMap<String, usize>,
) -> HashMap<String, f64> {
    let mut coordinated: HashMap<&str, usize> = HashMap::new();
    for ((_frame, solvent), residues) in solvation_data.residues_per_frame() {
        *coordinated.entry(solvent).or_insert(0) += residues.len();
    }
    let mut free = HashMap::new();
    for (solvent, population) in solvent_counts {
        if *population == 0 {
            warn!("solvent '{}' has zero population, free fraction set to 0", solvent);
            free.insert(solvent.clone(), 0.0);
            continue;
        }
        let per_frame =
            coordinated.get(solvent.as_str()).copied().unwrap_or(0) as f64 / n_frames as f64;
        free.insert(solvent.clone(), 1.0 - per_frame / *population as f64);
    }
    free
}

/// population minus distinct coordinated residues, normalized across solvents in each frame
fn diluent_composition(
    solvation_data: &SolvationData,
    solvent_counts: &HashMap<String, usize>,
) -> (HashMap<String, f64>, FrameTable<f64>, FrameTable<usize>) {
    let solvents: Vec<String> = solvent_counts
        .keys()
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();
    let frames = solvation_data.frames();
    let residues_per_frame = solvation_data.residues_per_frame();

    let mut diluent_counts = FrameTable::zeros(frames.clone(), solvents.clone());
    for &frame in &frames {
        for solvent in &solvents {
            let coordinated = residues_per_frame
                .get(&(frame, solvent.as_str()))
                .map(|residues| residues.len())
                .unwrap_or(0);
            // populations were checked against coordinated counts on construction
            let diluent = solvent_counts[solvent].saturating_sub(coordinated);
            diluent_counts.set(frame, solvent, diluent);
        }
    }

    let mut diluent_by_frame = FrameTable::zeros(frames.clone(), solvents.clone());
    let mut sums: HashMap<String, f64> = HashMap::new();
    let mut n_counted_frames = 0usize;
    for (i, &frame) in frames.iter().enumerate() {
        let total: usize = diluent_counts.values.row(i).iter().sum();
        if total == 0 {
            warn!("frame {}: no uncoordinated solvent, frame excluded from diluent average", frame);
            continue;
        }
        n_counted_frames += 1;
        for (j, solvent) in solvents.iter().enumerate() {
            let fraction = diluent_counts.values[(i, j)] as f64 / total as f64;
            diluent_by_frame.values[(i, j)] = fraction;
            *sums.entry(solvent.clone()).or_insert(0.0) += fraction;
        }
    }
    let diluent_dict = if n_counted_frames == 0 {
        HashMap::new()
    } else {
        sums.into_iter()
            .map(|(solvent, sum)| (solvent, sum / n_counted_frames as f64))
            .collect()
    };
    (diluent_dict, diluent_by_frame, diluent_counts)
}
