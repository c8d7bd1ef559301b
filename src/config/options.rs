//! Per-solve options for the LSQR engine.
//!
//! This module provides the `LsqrOptions` struct, which collects the
//! numerical controls of a single solve: the damping parameter, stopping
//! tolerances, iteration limit, optional trust-region radius, and the flag
//! requesting diagonal variance estimates. The struct is read-only for the
//! duration of a solve.

use num_traits::Float;

/// Numerical controls for one LSQR solve.
///
/// With `atol = btol = 1e-9` the final residual norm should be accurate to
/// roughly nine digits; the solution itself usually has fewer correct digits,
/// depending on `cond(A)` and the size of `damp`. For compatible systems
/// `conlim` may be as large as `1e12`; for least-squares problems it should
/// stay below `1e8`.
#[derive(Debug, Clone)]
pub struct LsqrOptions<T> {
    /// Damping/regularization parameter (`0` for plain least squares).
    pub damp: T,

    /// Stopping tolerance on the compatibility test.
    pub atol: T,

    /// Stopping tolerance on the residual test.
    pub btol: T,

    /// Condition-number limit; the solve stops once the running estimate of
    /// `cond(Abar)` exceeds it.
    pub conlim: T,

    /// Explicit iteration limit; `0` means `3n` where `n` is the operator
    /// column count.
    pub itnlim: usize,

    /// Optional trust-region radius. `None` leaves the recursion
    /// unconstrained.
    pub radius: Option<T>,

    /// Request per-coordinate estimates of the diagonal of
    /// `(AᵗA + damp²·I)⁻¹`.
    pub want_variance: bool,
}

impl<T: Float + From<f64>> Default for LsqrOptions<T> {
    fn default() -> Self {
        Self {
            damp: T::zero(),
            atol: <T as From<f64>>::from(1.0e-9),
            btol: <T as From<f64>>::from(1.0e-9),
            conlim: <T as From<f64>>::from(1.0e+8),
            itnlim: 0,
            radius: None,
            want_variance: false,
        }
    }
}

impl<T: Float + From<f64>> LsqrOptions<T> {
    /// Resolve the effective iteration limit for an operator with `n` columns.
    pub fn effective_itnlim(&self, n: usize) -> usize {
        if self.itnlim == 0 { 3 * n } else { self.itnlim }
    }

    /// Inverse condition limit used by the stopping tests: `1/conlim` when
    /// `conlim > 0`, otherwise `0` (which disables the user-level test and
    /// leaves only the machine-precision guard).
    pub fn ctol(&self) -> T {
        if self.conlim > T::zero() {
            T::one() / self.conlim
        } else {
            T::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = LsqrOptions::<f64>::default();
        assert_eq!(opts.damp, 0.0);
        assert_eq!(opts.atol, 1.0e-9);
        assert_eq!(opts.btol, 1.0e-9);
        assert_eq!(opts.conlim, 1.0e+8);
        assert_eq!(opts.itnlim, 0);
        assert!(opts.radius.is_none());
        assert!(!opts.want_variance);
    }

    #[test]
    fn zero_itnlim_means_three_n() {
        let opts = LsqrOptions::<f64>::default();
        assert_eq!(opts.effective_itnlim(7), 21);
        let opts = LsqrOptions::<f64> { itnlim: 5, ..Default::default() };
        assert_eq!(opts.effective_itnlim(7), 5);
    }

    #[test]
    fn ctol_is_inverse_conlim() {
        let opts = LsqrOptions::<f64>::default();
        assert_eq!(opts.ctol(), 1.0e-8);
        let opts = LsqrOptions::<f64> { conlim: 0.0, ..Default::default() };
        assert_eq!(opts.ctol(), 0.0);
    }
}
