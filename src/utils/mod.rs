//! Shared numerical utilities: stopping taxonomy, rotation helpers, and the
//! trust-region boundary quadratic.

pub mod convergence;
pub mod quadratic;
pub mod rotations;

pub use convergence::{IterationLog, SolveStats, StopReason};
