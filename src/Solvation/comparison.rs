//! # Comparison Module
//!
//! ## Purpose
//! Lines up one per-solvent property (coordination number, pairing, free fraction,
//! diluent share) across several solutions, so that they can be tabulated or plotted
//! side by side.
//!
//! Solvents with different names in different solutions (e.g. "EAf" and "fEAf") can be
//! renamed to a common name first; the solvents to compare must then be present in
//! every solution.

use crate::Solvation::solute::Solute;
use crate::Solvation::solvation_errors::SolvationError;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// per-solvent dictionaries that can be compared between solutions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolventProperty {
    CoordinationNumber,
    Pairing,
    FreeSolvent,
    Diluent,
}

impl SolventProperty {
    fn dict<'a>(&self, solute: &'a Solute) -> Result<&'a HashMap<String, f64>, SolvationError> {
        match self {
            SolventProperty::CoordinationNumber => Ok(&solute.get_coordination()?.cn_dict),
            SolventProperty::Pairing => Ok(&solute.get_pairing()?.pairing_dict),
            SolventProperty::FreeSolvent => Ok(&solute.get_pairing()?.fraction_free_solvents),
            SolventProperty::Diluent => Ok(&solute.get_pairing()?.diluent_dict),
        }
    }
}

/// Renames solvents and keeps only the requested ones.
///
/// # Arguments
/// * `property_dict` - solution name -> (solvent -> value)
/// * `rename_solvents` - original solvent name -> common name, applied first
/// * `solvents_to_compare` - solvents to keep, in the common naming; empty keeps all
///
/// # Returns
/// solution name -> (solvent -> value)
///
/// # Errors
/// * `RenameCollision` - two solvents of one solution renamed to the same common name
/// * `SolventsNotShared` - a requested solvent is missing from any solution
pub fn compare_solvent_dicts(
    property_dict: &BTreeMap<String, HashMap<String, f64>>,
    rename_solvents: &HashMap<String, String>,
    solvents_to_compare: &[String],
) -> Result<BTreeMap<String, BTreeMap<String, f64>>, SolvationError> {
    let mut renamed: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for (solution, values) in property_dict {
        // common name -> original names, sorted so that errors are reproducible
        let mut sources: BTreeMap<&String, BTreeSet<&String>> = BTreeMap::new();
        for solvent in values.keys() {
            let common = rename_solvents.get(solvent).unwrap_or(solvent);
            sources.entry(common).or_default().insert(solvent);
        }
        if let Some((common, solvents)) = sources.iter().find(|(_, solvents)| solvents.len() > 1) {
            return Err(SolvationError::RenameCollision {
                solution: solution.clone(),
                common: common.to_string(),
                solvents: solvents.iter().map(|s| s.to_string()).collect(),
            });
        }
        let values = values
            .iter()
            .map(|(solvent, value)| {
                let common = rename_solvents.get(solvent).unwrap_or(solvent);
                (common.clone(), *value)
            })
            .collect();
        renamed.insert(solution.clone(), values);
    }

    if solvents_to_compare.is_empty() {
        return Ok(renamed);
    }
    let mut shared: Option<BTreeSet<String>> = None;
    for values in renamed.values() {
        let solvents: BTreeSet<String> = values.keys().cloned().collect();
        shared = Some(match shared {
            Some(shared) => shared.intersection(&solvents).cloned().collect(),
            None => solvents,
        });
    }
    let shared = shared.unwrap_or_default();
    if !solvents_to_compare.iter().all(|s| shared.contains(s)) {
        return Err(SolvationError::SolventsNotShared {
            requested: solvents_to_compare.to_vec(),
            valid: shared.into_iter().collect(),
        });
    }
    Ok(renamed
        .into_iter()
        .map(|(solution, values)| {
            let kept = values
                .into_iter()
                .filter(|(solvent, _)| solvents_to_compare.contains(solvent))
                .collect();
            (solution, kept)
        })
        .collect())
}

/// `compare_solvent_dicts` over a property of already analysed solutes, keyed by solute name
pub fn compare_solutes(
    solutes: &[&Solute],
    property: SolventProperty,
    rename_solvents: &HashMap<String, String>,
    solvents_to_compare: &[String],
) -> Result<BTreeMap<String, BTreeMap<String, f64>>, SolvationError> {
    let mut property_dict = BTreeMap::new();
    for solute in solutes {
        property_dict.insert(solute.name.clone(), property.dict(solute)?.clone());
    }
    compare_solvent_dicts(&property_dict, rename_solvents, solvents_to_compare)
}
