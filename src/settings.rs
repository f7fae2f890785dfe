//! # Settings Module
//!
//! ## Purpose
//! Holds the tunable parameters of the solvation analyses in one serializable
//! structure, so that a run can be reproduced from a JSON file.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "coordination_tolerance": 0.005,
//!   "network_solvents": ["PF6"],
//!   "analysis_classes": ["Coordination", "Pairing", "Speciation", "Networking"]
//! }
//! ```
//!
//! ## Usage Pattern
//! ```rust
//! use SolvAn::settings::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! assert_eq!(config.coordination_tolerance, 0.005);
//! assert!(config.validate().is_ok());
//! ```

use crate::Solvation::coordination::DEFAULT_COORDINATION_TOLERANCE;
use crate::Solvation::solvation_errors::SolvationError;
use crate::Utils::load_from_file::LoadError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// analyses that `Solute::run` may compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisClass {
    Coordination,
    Pairing,
    Speciation,
    Networking,
}

impl AnalysisClass {
    pub fn all() -> Vec<AnalysisClass> {
        vec![
            AnalysisClass::Coordination,
            AnalysisClass::Pairing,
            AnalysisClass::Speciation,
            AnalysisClass::Networking,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisClass::Coordination => "coordination",
            AnalysisClass::Pairing => "pairing",
            AnalysisClass::Speciation => "speciation",
            AnalysisClass::Networking => "networking",
        }
    }
}

/// parameters of the solvation analyses
///
/// # Fields
/// * `coordination_tolerance` - atom types contributing less than this fraction of a
///   solvent's coordinating atoms are dropped from `coordinating_atoms`
/// * `network_solvents` - solvents through which solutes network, `None` for all
/// * `analysis_classes` - analyses computed by `Solute::run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub coordination_tolerance: f64,
    pub network_solvents: Option<Vec<String>>,
    pub analysis_classes: Vec<AnalysisClass>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            coordination_tolerance: DEFAULT_COORDINATION_TOLERANCE,
            network_solvents: None,
            analysis_classes: AnalysisClass::all(),
        }
    }
}

impl AnalysisConfig {
    /// Loads configuration from a JSON file.
    ///
    /// A missing file is not an error: the default configuration is returned.
    /// Missing fields take their default values.
    ///
    /// # Returns
    /// * `Ok(AnalysisConfig)` - loaded or default configuration
    /// * `Err(LoadError)` - unreadable file, malformed JSON or invalid tolerance
    pub fn load(config_file: &str) -> Result<Self, LoadError> {
        if !Path::new(config_file).exists() {
            warn!("config file '{}' not found, using defaults", config_file);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(config_file)?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("analysis configuration loaded from '{}'", config_file);
        Ok(config)
    }

    /// writes the configuration as pretty JSON
    pub fn save(&self, config_file: &str) -> Result<(), LoadError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SolvationError> {
        if !(0.0..1.0).contains(&self.coordination_tolerance) {
            return Err(SolvationError::InvalidTolerance(
                self.coordination_tolerance,
            ));
        }
        Ok(())
    }

    pub fn enabled(&self, analysis: AnalysisClass) -> bool {
        self.analysis_classes.contains(&analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.coordination_tolerance, 0.005);
        assert_eq!(config.network_solvents, None);
        assert_eq!(config.analysis_classes.len(), 4);
        assert!(config.enabled(AnalysisClass::Networking));
    }

    #[test]
    fn test_save_and_load_config() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let config = AnalysisConfig {
            coordination_tolerance: 0.01,
            network_solvents: Some(vec!["PF6".to_string()]),
            analysis_classes: vec![AnalysisClass::Networking],
        };
        config.save(path).unwrap();
        let loaded = AnalysisConfig::load(path).unwrap();
        assert_eq!(loaded, config);
        assert!(!loaded.enabled(AnalysisClass::Pairing));
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        fs::write(path, r#"{ "network_solvents": ["PF6"] }"#).unwrap();
        let loaded = AnalysisConfig::load(path).unwrap();
        assert_eq!(loaded.coordination_tolerance, 0.005);
        assert_eq!(loaded.network_solvents, Some(vec!["PF6".to_string()]));
        assert_eq!(loaded.analysis_classes, AnalysisClass::all());
    }

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let loaded = AnalysisConfig::load("no_such_solvation_config.json").unwrap();
        assert_eq!(loaded, AnalysisConfig::default());
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        fs::write(path, r#"{ "coordination_tolerance": 1.5 }"#).unwrap();
        let err = AnalysisConfig::load(path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Solvation(SolvationError::InvalidTolerance(_))
        ));
    }
}
