//! # Speciation Module
//!
//! ## Purpose
//! Enumerates the composition of every solvation shell, i.e. for each frame and solute
//! the number of distinct coordinating residues of every solvent, and derives:
//! - **speciation_fraction**: frequency of each distinct shell composition
//! - **solvent_co_occurrence**: how much more (or less) often two solvents share a shell
//!   than they would under random mixing
//!
//! A solute with no coordinating residue in a frame has an empty shell. Empty shells are
//! not stored as rows of `speciation_data`, but they are counted in every frequency.

use crate::Solvation::solute::Solute;
use crate::Solvation::solvation_data::SolvationData;
use crate::Solvation::solvation_errors::SolvationError;
use log::{info, warn};
use nalgebra::DMatrix;
use std::collections::{BTreeMap, HashMap};

/// shell of one solute in one frame, `counts` follows `Speciation::solvents`
#[derive(Debug, Clone, PartialEq)]
pub struct Shell {
    pub frame: usize,
    pub solvated_atom: usize,
    pub counts: Vec<usize>,
}

impl Shell {
    /// number of residues in the shell
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// one distinct shell composition and how often it occurs
#[derive(Debug, Clone, PartialEq)]
pub struct ShellFraction {
    pub counts: Vec<usize>,
    pub count: usize,
    pub fraction: f64,
}

impl ShellFraction {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone)]
pub struct Speciation {
    pub n_frames: usize,
    pub n_solutes: usize,
    /// column order of every counts vector
    pub solvents: Vec<String>,
    /// non-empty shells ordered by (frame, solvated_atom)
    pub speciation_data: Vec<Shell>,
    /// (frame, solute) observations without any coordinating residue
    pub n_empty_shells: usize,
    /// distinct shells, most frequent first
    pub speciation_fraction: Vec<ShellFraction>,
    /// row i, column j: co-occurrence of solvent j in shells containing solvent i
    pub solvent_co_occurrence: DMatrix<f64>,
}

impl Speciation {
    pub fn new(
        solvation_data: &SolvationData,
        n_frames: usize,
        n_solutes: usize,
    ) -> Result<Self, SolvationError> {
        solvation_data.check_universe(n_frames, n_solutes)?;
        let solvents = solvation_data.solvent_names();
        let speciation_data = shells(solvation_data, &solvents);
        // check_universe bounds the observed shells by n_frames * n_solutes
        let n_empty_shells = (n_frames * n_solutes).saturating_sub(speciation_data.len());
        let speciation_fraction =
            speciation_fraction(&speciation_data, n_empty_shells, solvents.len(), n_frames * n_solutes);
        let solvent_co_occurrence = solvent_co_occurrence(&speciation_data, &solvents);
        info!(
            "speciation: {} distinct shells from {} observations ({} empty)",
            speciation_fraction.len(),
            n_frames * n_solutes,
            n_empty_shells
        );
        Ok(Self {
            n_frames,
            n_solutes,
            solvents,
            speciation_data,
            n_empty_shells,
            speciation_fraction,
            solvent_co_occurrence,
        })
    }

    pub fn from_solute(solute: &Solute) -> Result<Self, SolvationError> {
        let solvation_data = solute.solvation_data()?;
        Self::new(solvation_data, solute.system.n_frames, solute.system.n_solutes)
    }

    /// co-occurrence of `other` in shells that contain `given`
    pub fn co_occurrence(&self, given: &str, other: &str) -> Option<f64> {
        let i = self.solvents.iter().position(|s| s == given)?;
        let j = self.solvents.iter().position(|s| s == other)?;
        Some(self.solvent_co_occurrence[(i, j)])
    }

    /// stored shells matching a partial composition; solvents not mentioned are unconstrained
    ///
    /// # Example
    /// `{"BN": 4}` finds every shell with exactly four BN residues whatever else it holds
    pub fn find_shells(&self, composition: &HashMap<String, usize>) -> Vec<&Shell> {
        self.speciation_data
            .iter()
            .filter(|shell| self.matches(&shell.counts, composition))
            .collect()
    }

    /// fraction of all observations (empty shells included) matching a partial composition
    pub fn shell_fraction(&self, composition: &HashMap<String, usize>) -> f64 {
        self.speciation_fraction
            .iter()
            .filter(|shell| self.matches(&shell.counts, composition))
            .map(|shell| shell.fraction)
            .sum()
    }

    /// for every shell size, the fraction of the molecules in shells of that size belonging to each solvent
    pub fn shell_composition_by_size(&self) -> BTreeMap<usize, HashMap<String, f64>> {
        let mut sums: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for shell in &self.speciation_data {
            let entry = sums
                .entry(shell.total())
                .or_insert_with(|| vec![0; self.solvents.len()]);
            for (sum, count) in entry.iter_mut().zip(&shell.counts) {
                *sum += count;
            }
        }
        sums.into_iter()
            .map(|(size, counts)| {
                let molecules: usize = counts.iter().sum();
                let fractions = self
                    .solvents
                    .iter()
                    .zip(&counts)
                    .map(|(solvent, count)| (solvent.clone(), *count as f64 / molecules as f64))
                    .collect();
                (size, fractions)
            })
            .collect()
    }

    /// fraction of observations having each shell size, size 0 being the empty shell
    pub fn shell_size_histogram(&self) -> BTreeMap<usize, f64> {
        let mut histogram: BTreeMap<usize, f64> = BTreeMap::new();
        for shell in &self.speciation_fraction {
            *histogram.entry(shell.total()).or_insert(0.0) += shell.fraction;
        }
        histogram
    }

    fn matches(&self, counts: &[usize], composition: &HashMap<String, usize>) -> bool {
        composition.iter().all(|(solvent, wanted)| {
            let have = self
                .solvents
                .iter()
                .position(|s| s == solvent)
                .map(|j| counts[j])
                .unwrap_or(0);
            have == *wanted
        })
    }
}

/// distinct coordinating residues of each solvent per (frame, solute)
fn shells(solvation_data: &SolvationData, solvents: &[String]) -> Vec<Shell> {
    let mut shells: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for ((frame, solute, solvent), residues) in solvation_data.residues_per_shell() {
        let counts = shells
            .entry((frame, solute))
            .or_insert_with(|| vec![0; solvents.len()]);
        if let Some(j) = solvents.iter().position(|s| s == solvent) {
            counts[j] = residues.len();
        }
    }
    shells
        .into_iter()
        .map(|((frame, solvated_atom), counts)| Shell {
            frame,
            solvated_atom,
            counts,
        })
        .collect()
}

fn speciation_fraction(
    shells: &[Shell],
    n_empty_shells: usize,
    n_solvents: usize,
    n_observations: usize,
) -> Vec<ShellFraction> {
    let mut frequencies: BTreeMap<Vec<usize>, usize> = BTreeMap::new();
    for shell in shells {
        *frequencies.entry(shell.counts.clone()).or_insert(0) += 1;
    }
    if n_empty_shells > 0 {
        *frequencies.entry(vec![0; n_solvents]).or_insert(0) += n_empty_shells;
    }
    let mut fractions: Vec<ShellFraction> = frequencies
        .into_iter()
        .map(|(counts, count)| ShellFraction {
            counts,
            count,
            fraction: count as f64 / n_observations as f64,
        })
        .collect();
    fractions.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.total().cmp(&b.total()))
            .then(a.counts.cmp(&b.counts))
    });
    fractions
}

/// observed over random-mixing expected co-occurrence
///
/// for the shells containing solvent i, there are (residues - shells) coordination slots
/// left once the one residue of i that selects the shell is removed; under random mixing
/// a share of those slots equal to the share of j among all solvating residues holds j
fn solvent_co_occurrence(shells: &[Shell], solvents: &[String]) -> DMatrix<f64> {
    let n = solvents.len();
    let mut matrix = DMatrix::zeros(n, n);
    let mut solvent_totals = vec![0usize; n];
    for shell in shells {
        for (total, count) in solvent_totals.iter_mut().zip(&shell.counts) {
            *total += count;
        }
    }
    let all_residues: usize = solvent_totals.iter().sum();
    if all_residues == 0 {
        return matrix;
    }
    for i in 0..n {
        let shells_with_i: Vec<&Shell> = shells.iter().filter(|s| s.counts[i] > 0).collect();
        let n_shells = shells_with_i.len();
        let n_residues: usize = shells_with_i.iter().map(|s| s.total()).sum();
        let slots = n_residues - n_shells;
        for j in 0..n {
            let mut actual: usize = shells_with_i.iter().map(|s| s.counts[j]).sum();
            if i == j {
                actual -= n_shells;
            }
            let expected = solvent_totals[j] as f64 / all_residues as f64 * slots as f64;
            matrix[(i, j)] = if expected > 0.0 {
                actual as f64 / expected
            } else {
                warn!(
                    "no expected co-occurrence of '{}' given '{}', set to 0",
                    solvents[j], solvents[i]
                );
                0.0
            };
        }
    }
    matrix
}
