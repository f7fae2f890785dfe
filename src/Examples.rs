/// worked solvation analyses on a small synthetic electrolyte
pub mod solvation_examples;
