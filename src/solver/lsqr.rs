//! LSQR solver (Paige & Saunders)
//!
//! This module implements the LSQR algorithm for the linear system `Ax = b`,
//! the least-squares problem `min ‖Ax − b‖`, and the regularized problem
//! `min ‖Ax − b‖² + damp²·‖x‖²`. The operator `A` is abstract: LSQR only ever
//! forms the products `A·v` and `Aᵗ·u`, so dense, sparse, and matrix-free
//! operators are interchangeable.
//!
//! # Overview
//!
//! - Golub–Kahan bidiagonalization generates unit vectors `u` (length m) and
//!   `v` (length n); plane rotations reduce the resulting lower-bidiagonal
//!   system, one entry per iteration, and the solution is accumulated along
//!   the search direction `w`.
//! - A first rotation folds the damping parameter into the diagonal, so the
//!   regularized problem never forms `AᵗA + damp²·I` explicitly.
//! - An optional trust-region radius caps `‖x‖`: when the unconstrained step
//!   would cross the boundary, the step is cut at the boundary and the solve
//!   stops there.
//! - Termination is always via a stop code (see `StopReason`), never an
//!   error; the best-effort solution is returned in every case.
//!
//! # Usage
//!
//! - Create an `LsqrSolver` from an `LsqrOptions` value.
//! - Call `solve` with the operator, right-hand side, and a length-`n`
//!   output buffer.
//! - The solver returns `SolveStats` with the stop reason, residual norms,
//!   and condition estimate.
//!
//! # References
//! - C. C. Paige and M. A. Saunders (1982a). LSQR: An algorithm for sparse
//!   linear equations and sparse least squares, ACM TOMS 8(1), 43-71.
//! - C. C. Paige and M. A. Saunders (1982b). Algorithm 583. LSQR: Sparse
//!   linear equations and least squares problems, ACM TOMS 8(2), 195-209.
//! - M. A. Saunders (1995). Solution of sparse rectangular systems using
//!   LSQR and CRAIG, BIT 35, 588-604.

use num_traits::Float;

use crate::config::options::LsqrOptions;
use crate::core::traits::{InnerProduct, MatTransVec, MatVec, OpShape};
use crate::error::LsqError;
use crate::solver::LeastSquaresSolver;
use crate::utils::convergence::{IterationLog, SolveStats, StopReason};
use crate::utils::quadratic::roots_quadratic;
use crate::utils::rotations::{norm_of2, norm_of4, plane_rotation};

/// LSQR solver struct.
///
/// Stores the per-solve options and an optional iteration monitor. The
/// monitor receives one `IterationLog` per full iteration and is purely
/// observational.
pub struct LsqrSolver<T> {
    pub opts: LsqrOptions<T>,
    monitor: Option<Box<dyn FnMut(&IterationLog<T>)>>,
}

impl<T: Float + From<f64>> LsqrSolver<T> {
    /// Create a new LSQR solver with the given options.
    pub fn new(opts: LsqrOptions<T>) -> Self {
        Self { opts, monitor: None }
    }

    /// Create a new LSQR solver with default options.
    pub fn with_defaults() -> Self {
        Self::new(LsqrOptions::default())
    }

    /// Install an iteration monitor. The monitor observes per-iteration
    /// diagnostics and cannot affect the recursion.
    pub fn set_monitor<F>(&mut self, f: F)
    where
        F: FnMut(&IterationLog<T>) + 'static,
    {
        self.monitor = Some(Box::new(f));
    }

    /// Remove any installed monitor.
    pub fn clear_monitor(&mut self) {
        self.monitor = None;
    }
}

impl<M, V, T> LeastSquaresSolver<M, V> for LsqrSolver<T>
where
    M: MatVec<V> + MatTransVec<V> + OpShape,
    (): InnerProduct<V, Scalar = T>,
    V: AsMut<[T]> + AsRef<[T]> + From<Vec<T>> + Clone,
    T: Float + From<f64>,
{
    type Error = LsqError;
    type Scalar = T;

    /// Solve `min ‖Ax − b‖` (damped if `opts.damp > 0`) with LSQR.
    ///
    /// # Arguments
    /// * `a` - Linear operator (forward and transpose products)
    /// * `b` - Right-hand side; its first `m` entries are used
    /// * `x` - Output buffer of length `n`; overwritten with the solution
    ///
    /// Returns solve diagnostics; all terminations including non-convergence
    /// are reported through `SolveStats.istop`, never as an `Err`.
    fn solve(&mut self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<T>, LsqError> {
        let (m, n) = a.shape();
        let ip = ();
        let one = T::one();
        let zero = T::zero();
        let two = one + one;

        if b.as_ref().len() < m {
            return Err(LsqError::RhsTooShort { m, len: b.as_ref().len() });
        }
        if x.as_ref().len() != n {
            return Err(LsqError::SolutionLengthMismatch { n, len: x.as_ref().len() });
        }
        if b.as_ref()[..m].iter().any(|bi| !bi.is_finite()) {
            return Err(LsqError::NonFiniteRhs);
        }

        let damp = self.opts.damp;
        let dampsq = damp * damp;
        let atol = self.opts.atol;
        let btol = self.opts.btol;
        let ctol = self.opts.ctol();
        let itnlim = self.opts.effective_itnlim(n);
        let radius = self.opts.radius;
        let mut var = if self.opts.want_variance {
            Some(vec![zero; n])
        } else {
            None
        };

        let mut itn = 0usize;
        let mut istop: Option<StopReason> = None;
        let mut anorm = zero;
        let mut acond = zero;
        let mut cs2 = -one;
        let mut sn2 = zero;
        let mut z = zero;
        let mut xnorm = zero;
        let mut xxnorm = zero;
        let mut ddnorm = zero;
        let mut res2 = zero;
        let mut tr_active = false;

        // First bidiagonalization vectors: beta*u = b, alfa*v = A'u.
        let mut xk = V::from(vec![zero; n]);
        let mut u = V::from(b.as_ref()[..m].to_vec());
        let mut v = V::from(vec![zero; n]);
        let mut w = V::from(vec![zero; n]);
        let mut tmp_m = V::from(vec![zero; m]);
        let mut tmp_n = V::from(vec![zero; n]);

        let mut alfa = zero;
        let mut beta = ip.norm(&u);
        if beta > zero {
            for ui in u.as_mut() {
                *ui = *ui / beta;
            }
            a.mattransvec(&u, &mut v);
            alfa = ip.norm(&v);
        }
        if alfa > zero {
            for vi in v.as_mut() {
                *vi = *vi / alfa;
            }
            w = v.clone();
        }

        let mut arnorm = alfa * beta;
        let bnorm = beta;
        let mut rhobar = alfa;
        let mut phibar = beta;
        let mut rnorm = beta;
        let mut r1norm = rnorm;
        let mut r2norm = rnorm;

        // alfa*beta = 0 means A'b = 0: x = 0 is the exact solution.
        if arnorm == zero {
            *x = xk;
            return Ok(SolveStats {
                istop: StopReason::SolutionIsZero,
                iterations: 0,
                r1norm,
                r2norm,
                anorm,
                acond,
                arnorm,
                xnorm,
                on_boundary: false,
                variance: var,
            });
        }

        while itn < itnlim {
            itn += 1;

            // Next bidiagonalization step:
            //   beta*u = A*v  - alfa*u,
            //   alfa*v = A'*u - beta*v.
            // A zero beta or alfa freezes the corresponding renormalization;
            // the recursion continues on the last-normalized vector.
            a.matvec(&v, &mut tmp_m);
            for (ui, ti) in u.as_mut().iter_mut().zip(tmp_m.as_ref()) {
                *ui = *ti - alfa * *ui;
            }
            beta = ip.norm(&u);
            if beta > zero {
                for ui in u.as_mut() {
                    *ui = *ui / beta;
                }
                anorm = norm_of4(anorm, alfa, beta, damp);
                a.mattransvec(&u, &mut tmp_n);
                for (vi, ti) in v.as_mut().iter_mut().zip(tmp_n.as_ref()) {
                    *vi = *ti - beta * *vi;
                }
                alfa = ip.norm(&v);
                if alfa > zero {
                    for vi in v.as_mut() {
                        *vi = *vi / alfa;
                    }
                }
            }

            // Plane rotation to eliminate the damping parameter; alters the
            // diagonal (rhobar) of the lower-bidiagonal matrix.
            let (cs1, sn1, rhobar1) = plane_rotation(rhobar, damp);
            let psi = sn1 * phibar;
            phibar = cs1 * phibar;

            // Plane rotation to eliminate the subdiagonal element (beta),
            // giving an upper-bidiagonal matrix.
            let (cs, sn, rho) = plane_rotation(rhobar1, beta);
            let theta = sn * alfa;
            rhobar = -cs * alfa;
            let phi = cs * phibar;
            phibar = sn * phibar;
            let tau = sn * phi;

            // Step along w.
            let t1 = phi / rho;
            let t2 = -theta / rho;

            if let Some(radius) = radius {
                if !tr_active {
                    // Distance to the trust-region boundary from x along w:
                    // intersect the ray with the sphere ‖x + s·w‖ = radius.
                    let xw = ip.dot(&xk, &w);
                    let ww = ip.dot(&w, &w);
                    let roots =
                        roots_quadratic(ww, two * xw, xnorm * xnorm - radius * radius);

                    // Largest-magnitude real root with the same sign as t1.
                    let mut step_max: Option<T> = None;
                    for r in roots {
                        if r * t1 > zero && step_max.map_or(true, |s| r.abs() > s.abs()) {
                            step_max = Some(r);
                        }
                    }

                    if let Some(step) = step_max {
                        if t1.abs() > step.abs() {
                            for (xi, wi) in xk.as_mut().iter_mut().zip(w.as_ref()) {
                                *xi = *xi + step * *wi;
                            }
                            xnorm = radius;
                            r1norm =
                                norm_of2(rho * step * sn, rho * step * cs - phibar);
                            tr_active = true;
                            istop = Some(StopReason::TrustRegionBoundary);
                        }
                    }
                }
            }

            if !tr_active {
                // dk = w/rho feeds the condition estimate and, if requested,
                // the diagonal variance estimate. Uses w before its update.
                let mut dknorm_sq = zero;
                for (j, wj) in w.as_ref().iter().enumerate() {
                    let dkj = *wj / rho;
                    dknorm_sq = dknorm_sq + dkj * dkj;
                    if let Some(var) = var.as_mut() {
                        var[j] = var[j] + dkj * dkj;
                    }
                }

                // x += t1*w, then w = t2*w + v.
                for (xi, wi) in xk.as_mut().iter_mut().zip(w.as_ref()) {
                    *xi = *xi + t1 * *wi;
                }
                for (wi, vi) in w.as_mut().iter_mut().zip(v.as_ref()) {
                    *wi = t2 * *wi + *vi;
                }
                ddnorm = ddnorm + dknorm_sq;

                // Plane rotation on the right to eliminate the super-diagonal
                // element (theta), then estimate norm(x) from the result.
                let delta = sn2 * rho;
                let gambar = -cs2 * rho;
                let rhs = phi - delta * z;
                let zbar = rhs / gambar;
                xnorm = (xxnorm + zbar * zbar).sqrt();
                let gamma = norm_of2(gambar, theta);
                cs2 = gambar / gamma;
                sn2 = theta / gamma;
                z = rhs / gamma;
                xxnorm = xxnorm + z * z;

                // Estimate cond(Abar) and the norms of rbar and Abar'rbar.
                acond = anorm * ddnorm.sqrt();
                let res1 = phibar * phibar;
                res2 = res2 + psi * psi;
                rnorm = (res1 + res2).sqrt();
                arnorm = alfa * tau.abs();

                // rnorm is the regularized residual; recover
                // r1norm = ‖b - Ax‖ from r1norm² = rnorm² - damp²·‖x‖².
                // Cancellation can push the square negative; the sign is
                // kept as a flag.
                let r1sq = rnorm * rnorm - dampsq * xxnorm;
                r1norm = r1sq.abs().sqrt();
                if r1sq < zero {
                    r1norm = -r1norm;
                }
                r2norm = rnorm;

                // Convergence tests. The guards against tiny atol/btol/ctol
                // behave like atol = btol = eps, conlim = 1/eps.
                let test1 = rnorm / bnorm;
                let test2 = arnorm / (anorm * rnorm);
                let test3 = if acond == zero { T::infinity() } else { one / acond };
                let t1_ratio = test1 / (one + anorm * xnorm / bnorm);
                let rtol = btol + atol * anorm * xnorm / bnorm;

                // Assignment order matters: a later (lower-coded) test
                // overwrites an earlier one in the same pass.
                if itn >= itnlim {
                    istop = Some(StopReason::IterationLimit);
                }
                if one + test3 <= one {
                    istop = Some(StopReason::ConditionAtMachinePrecision);
                }
                if one + test2 <= one {
                    istop = Some(StopReason::LeastSquaresAtMachinePrecision);
                }
                if one + t1_ratio <= one {
                    istop = Some(StopReason::ResidualAtMachinePrecision);
                }
                if test3 <= ctol {
                    istop = Some(StopReason::ConditionLimit);
                }
                if test2 <= atol {
                    istop = Some(StopReason::LeastSquaresSmall);
                }
                if test1 <= rtol {
                    istop = Some(StopReason::ResidualSmall);
                }

                if let Some(mon) = self.monitor.as_mut() {
                    mon(&IterationLog {
                        itn,
                        x0: xk.as_ref()[0],
                        r1norm,
                        r2norm,
                        test1,
                        test2,
                        anorm,
                        acond,
                    });
                }
            }

            if istop.is_some() {
                break;
            }
        }

        *x = xk;
        Ok(SolveStats {
            istop: istop.unwrap_or(StopReason::IterationLimit),
            iterations: itn,
            r1norm,
            r2norm,
            anorm,
            acond,
            arnorm,
            xnorm,
            on_boundary: tr_active,
            variance: var,
        })
    }
}
