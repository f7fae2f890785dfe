/// reading solvation tasks (system, atom types, solvation data) from files
pub mod load_from_file;
/// logger initialisation
pub mod logger;
