//! krylsq: LSQR least-squares engine over abstract linear operators
//!
//! This crate implements the LSQR algorithm of Paige & Saunders for linear
//! systems and (damped) linear least-squares problems, with an optional
//! trust-region radius. The operator is abstract: anything providing forward
//! and transpose matrix-vector products can be solved against, whether dense
//! (`faer::Mat`), sparse (`CsrMatrix`), or matrix-free (`FnOperator`).

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use self::core::*;
pub use config::*;
pub use error::*;
pub use matrix::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
