//! Loading of solvation tasks from text files.
//!
//! A task file holds JSON documents under upper-case section headers:
//! ```text
//! SYSTEM
//! { "n_frames": 10, "n_solutes": 4, "solvent_counts": { "BN": 40, "PF6": 4 } }
//! ATOM_TYPES
//! { "100": "N", "101": "C" }
//! SOLVATION_DATA
//! [ { "frame": 0, "solvated_atom": 1, "atom_ix": 100, "res_ix": 7,
//!     "solvent_name": "BN", "distance": 2.1 } ]
//! ```
//! A section ends at the next header or at the end of the file.
use crate::Solvation::solute::SolventSystem;
use crate::Solvation::solvation_data::{SolvationData, SolvationRecord};
use crate::Solvation::solvation_errors::SolvationError;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// error types for reading solvation tasks
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no '{header}' header found in file '{file_name}'")]
    MissingSection { header: String, file_name: String },
    #[error("invalid solvation data: {0}")]
    Solvation(#[from] SolvationError),
}

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: &str) -> Self {
        LoadData {
            file_name: file_name.to_string(),
        }
    }
    pub fn load_system(&self) -> Result<SolventSystem, LoadError> {
        let system: SolventSystem = load_section(&self.file_name, "SYSTEM")?;
        system.validate()?;
        Ok(system)
    }
    pub fn load_atom_types(&self) -> Result<HashMap<usize, String>, LoadError> {
        load_section(&self.file_name, "ATOM_TYPES")
    }
    pub fn load_solvation_data(&self) -> Result<SolvationData, LoadError> {
        let records: Vec<SolvationRecord> = load_section(&self.file_name, "SOLVATION_DATA")?;
        if records.is_empty() {
            warn!("solvation data in '{}' is empty", self.file_name);
        }
        Ok(SolvationData::new(records)?)
    }
}

/// Parses the JSON document under `header` in a task file.
pub fn load_section<T: DeserializeOwned>(file_name: &str, header: &str) -> Result<T, LoadError> {
    let file = File::open(Path::new(file_name))?;
    let reader = BufReader::new(file);
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;

    let start_index = lines
        .iter()
        .position(|line| line.trim().to_uppercase() == header)
        .map(|i| i + 1)
        .ok_or_else(|| LoadError::MissingSection {
            header: header.to_string(),
            file_name: file_name.to_string(),
        })?;

    // next header or end of file
    let end_index = lines[start_index..]
        .iter()
        .position(|line| is_header(line))
        .map(|i| start_index + i)
        .unwrap_or(lines.len());

    let section = lines[start_index..end_index].join("\n");
    match serde_json::from_str(&section) {
        Ok(data) => {
            info!("parsed section '{}' from file '{}'", header, file_name);
            Ok(data)
        }
        Err(e) => {
            let actual_line = start_index + e.line().saturating_sub(1);
            error!(
                "error parsing section '{}' at line {}, column {} (line {} in file): {}",
                header,
                e.line(),
                e.column(),
                actual_line + 1,
                e
            );
            if let Some(problem_line) = lines.get(actual_line) {
                error!("Problematic line: {}", problem_line);
            }
            Err(e.into())
        }
    }
}

fn is_header(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// reads a plain JSON array of solvation records
pub fn load_solvation_data_json(file_name: &str) -> Result<SolvationData, LoadError> {
    let content = fs::read_to_string(file_name)?;
    let records: Vec<SolvationRecord> = serde_json::from_str(&content)?;
    info!(
        "loaded {} solvation records from '{}'",
        records.len(),
        file_name
    );
    Ok(SolvationData::new(records)?)
}

/// writes the records of a table as a plain JSON array
pub fn save_solvation_data_json(data: &SolvationData, file_name: &str) -> Result<(), LoadError> {
    let content = serde_json::to_string_pretty(data.records())?;
    fs::write(file_name, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TASK: &str = r#"
SYSTEM
{ "n_frames": 2, "n_solutes": 2, "solvent_counts": { "BN": 5, "PF6": 2 } }
ATOM_TYPES
{ "10": "N", "11": "C", "20": "F" }
SOLVATION_DATA
[
  { "frame": 0, "solvated_atom": 1, "atom_ix": 10, "res_ix": 3, "solvent_name": "BN", "distance": 2.1 },
  { "frame": 0, "solvated_atom": 1, "atom_ix": 20, "res_ix": 8, "solvent_name": "PF6", "dist": 2.3 },
  { "frame": 1, "solvated_atom": 2, "atom_ix": 11, "res_ix": 3, "solvent_name": "BN", "distance": 2.6 }
]
"#;

    fn task_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_task_sections() {
        let file = task_file(TASK);
        let loader = LoadData::new(file.path().to_str().unwrap());
        let system = loader.load_system().unwrap();
        assert_eq!(system.n_frames, 2);
        assert_eq!(system.solvent_counts["PF6"], 2);
        let atom_types = loader.load_atom_types().unwrap();
        assert_eq!(atom_types[&20], "F");
        let data = loader.load_solvation_data().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.records()[1].distance, 2.3);
        assert_eq!(data.frames(), vec![0, 1]);
    }

    #[test]
    fn test_missing_section() {
        let file = task_file("SYSTEM\n{ \"n_frames\": 1, \"n_solutes\": 1, \"solvent_counts\": {} }\n");
        let loader = LoadData::new(file.path().to_str().unwrap());
        assert!(loader.load_system().is_ok());
        let err = loader.load_solvation_data().unwrap_err();
        assert!(matches!(err, LoadError::MissingSection { .. }));
    }

    #[test]
    fn test_invalid_rows_rejected() {
        let file = task_file(
            "SOLVATION_DATA\n[{ \"frame\": 0, \"solvated_atom\": 1, \"atom_ix\": 10, \"res_ix\": 3, \"solvent_name\": \"BN\", \"distance\": -1.0 }]\n",
        );
        let loader = LoadData::new(file.path().to_str().unwrap());
        let err = loader.load_solvation_data().unwrap_err();
        assert!(matches!(
            err,
            LoadError::Solvation(SolvationError::InvalidDistance { .. })
        ));
    }

    #[test]
    fn test_zero_frames_rejected() {
        let file = task_file("SYSTEM\n{ \"n_frames\": 0, \"n_solutes\": 1, \"solvent_counts\": {} }\n");
        let loader = LoadData::new(file.path().to_str().unwrap());
        let err = loader.load_system().unwrap_err();
        assert!(matches!(err, LoadError::Solvation(SolvationError::NoFrames)));
    }

    #[test]
    fn test_json_table_save_and_load() {
        let data = SolvationData::new(vec![
            SolvationRecord::new(0, 1, 10, 3, "BN", 2.1),
            SolvationRecord::new(0, 2, 11, 3, "BN", 2.4),
        ])
        .unwrap();
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        save_solvation_data_json(&data, path).unwrap();
        let loaded = load_solvation_data_json(path).unwrap();
        assert_eq!(loaded, data);
    }
}
