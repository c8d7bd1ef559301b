//! Stopping taxonomy & solve diagnostics for the LSQR engine.
//!
//! LSQR never fails mid-recursion: every run ends with one of nine stop
//! codes and a best-effort solution. This module defines that taxonomy
//! (`StopReason`), the diagnostic record returned by a solve
//! (`SolveStats`), and the per-iteration record handed to an optional
//! monitor (`IterationLog`).

use std::fmt;

/// Reason a solve terminated, in the numbering of Paige & Saunders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `x = 0` is the exact solution (`‖Aᵗb‖ = 0` at startup).
    SolutionIsZero,
    /// `Ax - b` is small enough, given `atol` and `btol`.
    ResidualSmall,
    /// The least-squares solution is good enough, given `atol`.
    LeastSquaresSmall,
    /// The estimate of `cond(Abar)` has exceeded `conlim`.
    ConditionLimit,
    /// `Ax - b` is small enough for this machine.
    ResidualAtMachinePrecision,
    /// The least-squares solution is good enough for this machine.
    LeastSquaresAtMachinePrecision,
    /// `cond(Abar)` seems to be too large for this machine.
    ConditionAtMachinePrecision,
    /// The iteration limit has been reached.
    IterationLimit,
    /// The trust-region boundary has been hit.
    TrustRegionBoundary,
}

impl StopReason {
    /// Numeric stop code 0–8.
    pub fn code(self) -> u8 {
        match self {
            StopReason::SolutionIsZero => 0,
            StopReason::ResidualSmall => 1,
            StopReason::LeastSquaresSmall => 2,
            StopReason::ConditionLimit => 3,
            StopReason::ResidualAtMachinePrecision => 4,
            StopReason::LeastSquaresAtMachinePrecision => 5,
            StopReason::ConditionAtMachinePrecision => 6,
            StopReason::IterationLimit => 7,
            StopReason::TrustRegionBoundary => 8,
        }
    }

    /// Full termination message.
    pub fn message(self) -> &'static str {
        match self {
            StopReason::SolutionIsZero => "The exact solution is x = 0",
            StopReason::ResidualSmall => "Ax - b is small enough, given atol, btol",
            StopReason::LeastSquaresSmall => {
                "The least-squares solution is good enough, given atol"
            }
            StopReason::ConditionLimit => "The estimate of cond(Abar) has exceeded conlim",
            StopReason::ResidualAtMachinePrecision => {
                "Ax - b is small enough for this machine"
            }
            StopReason::LeastSquaresAtMachinePrecision => {
                "The least-squares solution is good enough for this machine"
            }
            StopReason::ConditionAtMachinePrecision => {
                "Cond(Abar) seems to be too large for this machine"
            }
            StopReason::IterationLimit => "The iteration limit has been reached",
            StopReason::TrustRegionBoundary => "The trust-region boundary has been hit",
        }
    }

    /// Coarse classification of the outcome.
    pub fn status(self) -> &'static str {
        match self {
            StopReason::SolutionIsZero => "solution is zero",
            StopReason::ResidualSmall
            | StopReason::LeastSquaresSmall
            | StopReason::ResidualAtMachinePrecision
            | StopReason::LeastSquaresAtMachinePrecision => "residual small",
            StopReason::ConditionLimit | StopReason::ConditionAtMachinePrecision => {
                "ill-conditioned operator"
            }
            StopReason::IterationLimit => "max iterations",
            StopReason::TrustRegionBoundary => "trust-region boundary active",
        }
    }

    /// True for the codes that mean the requested (or machine-limited)
    /// accuracy was reached.
    pub fn converged(self) -> bool {
        matches!(
            self,
            StopReason::SolutionIsZero
                | StopReason::ResidualSmall
                | StopReason::LeastSquaresSmall
                | StopReason::ResidualAtMachinePrecision
                | StopReason::LeastSquaresAtMachinePrecision
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Diagnostic record of one completed solve.
#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    /// Why the recursion stopped.
    pub istop: StopReason,
    /// Iterations performed.
    pub iterations: usize,
    /// `‖b − Ax‖` (recovered from the regularized residual when `damp > 0`;
    /// negative sign flags cancellation in that recovery).
    pub r1norm: T,
    /// `sqrt(‖b − Ax‖² + damp²·‖x‖²)`; equals `r1norm` when `damp = 0`.
    pub r2norm: T,
    /// Running estimate of the Frobenius norm of the regularized operator.
    pub anorm: T,
    /// Running estimate of `cond(Abar)`.
    pub acond: T,
    /// Estimate of `‖Aᵗr − damp²·x‖`.
    pub arnorm: T,
    /// `‖x‖`.
    pub xnorm: T,
    /// True if the returned `x` sits on the trust-region boundary.
    pub on_boundary: bool,
    /// Per-coordinate estimates of the diagonal of `(AᵗA + damp²·I)⁻¹`,
    /// if requested.
    pub variance: Option<Vec<T>>,
}

/// One row of the iteration log, as handed to a solve monitor.
///
/// Purely observational; a monitor can never affect control flow.
#[derive(Clone, Copy, Debug)]
pub struct IterationLog<T> {
    /// Iteration number, starting at 1.
    pub itn: usize,
    /// First component of the current solution estimate.
    pub x0: T,
    /// `‖b − Ax‖` estimate after this iteration.
    pub r1norm: T,
    /// Regularized residual norm after this iteration.
    pub r2norm: T,
    /// Compatibility ratio `rnorm/bnorm`.
    pub test1: T,
    /// Least-squares optimality ratio `arnorm/(anorm·rnorm)`.
    pub test2: T,
    /// Running operator-norm estimate.
    pub anorm: T,
    /// Running condition estimate.
    pub acond: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_cover_zero_through_eight() {
        let all = [
            StopReason::SolutionIsZero,
            StopReason::ResidualSmall,
            StopReason::LeastSquaresSmall,
            StopReason::ConditionLimit,
            StopReason::ResidualAtMachinePrecision,
            StopReason::LeastSquaresAtMachinePrecision,
            StopReason::ConditionAtMachinePrecision,
            StopReason::IterationLimit,
            StopReason::TrustRegionBoundary,
        ];
        for (i, r) in all.iter().enumerate() {
            assert_eq!(r.code() as usize, i);
        }
    }

    #[test]
    fn status_classification() {
        assert_eq!(StopReason::SolutionIsZero.status(), "solution is zero");
        assert_eq!(StopReason::ResidualSmall.status(), "residual small");
        assert_eq!(StopReason::ResidualAtMachinePrecision.status(), "residual small");
        assert_eq!(StopReason::ConditionLimit.status(), "ill-conditioned operator");
        assert_eq!(StopReason::IterationLimit.status(), "max iterations");
        assert_eq!(
            StopReason::TrustRegionBoundary.status(),
            "trust-region boundary active"
        );
    }

    #[test]
    fn convergence_flags() {
        assert!(StopReason::ResidualSmall.converged());
        assert!(StopReason::LeastSquaresAtMachinePrecision.converged());
        assert!(!StopReason::IterationLimit.converged());
        assert!(!StopReason::ConditionLimit.converged());
        assert!(!StopReason::TrustRegionBoundary.converged());
    }
}
