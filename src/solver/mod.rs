//! Least-squares solver interfaces.

use crate::utils::convergence::SolveStats;

/// Common interface for solvers of `min ‖Ax − b‖` over an abstract operator.
pub trait LeastSquaresSolver<M, V> {
    type Error;
    /// Solve `min ‖Ax − b‖`, writing the result into `x`.
    /// Returns solve diagnostics (stop reason, norms, condition estimate).
    fn solve(
        &mut self,
        a: &M,
        b: &V,
        x: &mut V,
    ) -> Result<SolveStats<<Self as LeastSquaresSolver<M, V>>::Scalar>, Self::Error>;
    type Scalar: Copy + PartialOrd + From<f64>;
}

pub mod lsqr;
pub use lsqr::LsqrSolver;
