use thiserror::Error;

// Unified error type for krylsq

#[derive(Error, Debug)]
pub enum LsqError {
    #[error("right-hand side has {len} entries but the operator has {m} rows")]
    RhsTooShort { m: usize, len: usize },
    #[error("solution buffer has {len} entries but the operator has {n} columns")]
    SolutionLengthMismatch { n: usize, len: usize },
    #[error("right-hand side contains a non-finite entry")]
    NonFiniteRhs,
}
