/// table of solute-solvent proximity events, the input of every analysis
/// # Examples
/// ```
/// use SolvAn::Solvation::solvation_data::{SolvationData, SolvationRecord};
/// // frame, solute atom, solvent atom, solvent residue, solvent name, distance
/// let data = SolvationData::new(vec![
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
///     SolvationRecord::new(0, 0, 20, 2, "A", 2.2),
///     SolvationRecord::new(0, 1, 11, 1, "A", 2.1),
/// ])
/// .unwrap();
/// assert_eq!(data.frames(), vec![0]);
/// assert_eq!(data.solvent_names(), vec!["A".to_string()]);
/// // the same solvent atom cannot appear twice for one solute in one frame
/// let duplicate = SolvationData::new(vec![
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
/// ]);
/// assert!(duplicate.is_err());
/// ```
pub mod solvation_data;
/// precondition errors of the analyses
pub mod solvation_errors;
/// coordination numbers and coordinating atom types
/// # Examples
/// ```
/// use SolvAn::Solvation::coordination::Coordination;
/// use SolvAn::Solvation::solvation_data::{SolvationData, SolvationRecord};
/// use std::collections::HashMap;
/// let data = SolvationData::new(vec![
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
///     SolvationRecord::new(0, 0, 20, 2, "A", 2.2),
///     SolvationRecord::new(0, 1, 11, 1, "A", 2.1),
/// ])
/// .unwrap();
/// let atom_types: HashMap<usize, String> = HashMap::from([
///     (10, "O".to_string()),
///     (11, "C".to_string()),
///     (20, "O".to_string()),
/// ]);
/// // 1 frame, 2 solutes, atom types below 0.5% are dropped
/// let coordination = Coordination::new(&data, 1, 2, &atom_types, 0.005).unwrap();
/// assert_eq!(coordination.cn_dict["A"], 1.5);
/// assert!((coordination.coordinating_atoms["O"]["A"] - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub mod coordination;
/// pairing fractions, free solvent and diluent composition
/// # Examples
/// ```
/// use SolvAn::Solvation::pairing::Pairing;
/// use SolvAn::Solvation::solvation_data::{SolvationData, SolvationRecord};
/// use std::collections::HashMap;
/// let data = SolvationData::new(vec![
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
///     SolvationRecord::new(0, 0, 20, 2, "A", 2.2),
///     SolvationRecord::new(0, 1, 11, 1, "A", 2.1),
/// ])
/// .unwrap();
/// let solvent_counts = HashMap::from([("A".to_string(), 3), ("B".to_string(), 1)]);
/// let pairing = Pairing::new(&data, 1, 2, &solvent_counts).unwrap();
/// // both solutes see at least one A residue
/// assert_eq!(pairing.pairing_dict["A"], 1.0);
/// // two of the three A residues are coordinated
/// assert!((pairing.fraction_free_solvents["A"] - 1.0 / 3.0).abs() < 1e-12);
/// // the diluent is one A residue and one B residue
/// assert_eq!(pairing.diluent_dict["A"], 0.5);
/// ```
pub mod pairing;
/// shell compositions, their frequencies and solvent co-occurrence
/// # Examples
/// ```
/// use SolvAn::Solvation::speciation::Speciation;
/// use SolvAn::Solvation::solvation_data::{SolvationData, SolvationRecord};
/// let data = SolvationData::new(vec![
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
///     SolvationRecord::new(0, 0, 20, 2, "A", 2.2),
///     SolvationRecord::new(0, 1, 11, 1, "A", 2.1),
/// ])
/// .unwrap();
/// // 3 solutes: the third one has an empty shell
/// let speciation = Speciation::new(&data, 1, 3).unwrap();
/// assert_eq!(speciation.speciation_fraction.len(), 3);
/// assert_eq!(speciation.n_empty_shells, 1);
/// let total: f64 = speciation.speciation_fraction.iter().map(|s| s.fraction).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
pub mod speciation;
/// solutes linked into networks by shared solvent residues
/// # Examples
/// ```
/// use SolvAn::Solvation::networking::{Networking, SoluteState};
/// use SolvAn::Solvation::solvation_data::{SolvationData, SolvationRecord};
/// let data = SolvationData::new(vec![
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
///     SolvationRecord::new(0, 0, 20, 2, "A", 2.2),
///     SolvationRecord::new(0, 1, 11, 1, "A", 2.1),
/// ])
/// .unwrap();
/// let networking = Networking::new(&data, 1, 2, None).unwrap();
/// assert_eq!(networking.state_of(0, 0), SoluteState::Networked);
/// assert_eq!(networking.state_of(0, 1), SoluteState::Networked);
/// assert_eq!(networking.network_sizes[&0][&2], 1);
/// ```
pub mod networking;
/// solute owning the system invariants, the configuration and the computed analyses
/// # Examples
/// ```
/// use SolvAn::Solvation::solute::{Solute, SolventSystem};
/// use SolvAn::Solvation::solvation_data::{SolvationData, SolvationRecord};
/// use SolvAn::settings::AnalysisConfig;
/// use std::collections::HashMap;
/// let system = SolventSystem::new(1, 2, HashMap::from([("A".to_string(), 3)])).unwrap();
/// let atom_types: HashMap<usize, String> = HashMap::from([
///     (10, "O".to_string()),
///     (11, "O".to_string()),
///     (20, "O".to_string()),
/// ]);
/// let mut solute = Solute::new("Li", system, Box::new(atom_types), AnalysisConfig::default()).unwrap();
/// let data = SolvationData::new(vec![
///     SolvationRecord::new(0, 0, 10, 1, "A", 2.0),
///     SolvationRecord::new(0, 0, 20, 2, "A", 2.2),
///     SolvationRecord::new(0, 1, 11, 1, "A", 2.1),
/// ])
/// .unwrap();
/// solute.run(data).unwrap();
/// assert_eq!(solute.get_coordination().unwrap().cn_dict["A"], 1.5);
/// solute.pretty_print();
/// ```
pub mod solute;
/// side by side comparison of per-solvent properties of several solutions
pub mod comparison;
/// pretty-printed tables of the analyses
pub mod solvation_output;

/// tests
pub mod solvation_data_tests;
pub mod pairing_tests;
