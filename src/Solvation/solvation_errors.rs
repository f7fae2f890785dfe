use thiserror::Error;

/// error types for the solvation analyses
///
/// every variant is a precondition violation detected before any statistic is produced;
/// denominator-zero cases during normalization are NOT errors, they give defined zeros
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolvationError {
    #[error("number of frames must be at least 1")]
    NoFrames,
    #[error("number of solutes must be at least 1")]
    NoSolutes,
    #[error(
        "invalid distance {distance} for solute atom {solvated_atom} and solvent atom {atom_ix} in frame {frame}"
    )]
    InvalidDistance {
        frame: usize,
        solvated_atom: usize,
        atom_ix: usize,
        distance: f64,
    },
    #[error("duplicate event in frame {frame}: solute atom {solvated_atom}, solvent atom {atom_ix}")]
    DuplicateEvent {
        frame: usize,
        solvated_atom: usize,
        atom_ix: usize,
    },
    #[error("residue {res_ix} is labelled both '{first}' and '{second}'")]
    InconsistentResidue {
        res_ix: usize,
        first: String,
        second: String,
    },
    #[error("solvent '{0}' has no population count")]
    UnknownSolvent(String),
    #[error(
        "frame {frame}: {coordinated} distinct '{solvent}' residues are coordinated but the population is {population}"
    )]
    PopulationExceeded {
        frame: usize,
        solvent: String,
        coordinated: usize,
        population: usize,
    },
    #[error("solvation data contains {found} distinct frames but n_frames = {n_frames}")]
    FrameCountMismatch { found: usize, n_frames: usize },
    #[error("frame {frame} contains {found} distinct solutes but n_solutes = {n_solutes}")]
    SoluteCountMismatch {
        frame: usize,
        found: usize,
        n_solutes: usize,
    },
    #[error("no atom type known for solvent atom {0}")]
    MissingAtomType(usize),
    #[error("invalid coordination tolerance {0}: must be within [0, 1)")]
    InvalidTolerance(f64),
    #[error("solute '{0}' must be run before its analyses can be built")]
    NotRun(String),
    #[error("analysis '{analysis}' was not computed for solute '{solute}'")]
    AnalysisNotComputed { solute: String, analysis: String },
    #[error("solution '{solution}': solvents {solvents:?} are all renamed to '{common}'")]
    RenameCollision {
        solution: String,
        common: String,
        solvents: Vec<String>,
    },
    #[error("solvents {requested:?} are not present in all solutions; valid values are {valid:?}")]
    SolventsNotShared {
        requested: Vec<String>,
        valid: Vec<String>,
    },
}
