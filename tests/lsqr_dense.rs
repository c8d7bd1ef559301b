//! Tests for the LSQR solver against direct solves on random dense systems.
//!
//! These tests verify that LSQR reproduces the closed-form least-squares
//! solution obtained from the normal equations (solved with faer's direct LU)
//! on random well-conditioned overdetermined systems, and that the damped
//! variant keeps its residual norms consistent.

use approx::assert_abs_diff_eq;
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use krylsq::config::LsqrOptions;
use krylsq::core::traits::MatTransVec;
use krylsq::solver::{LeastSquaresSolver, LsqrSolver};
use krylsq::utils::StopReason;
use rand::Rng;

/// Random overdetermined system with a well-conditioned column space.
///
/// The top `n` rows carry a dominant diagonal so `A` has full column rank and
/// moderate condition number regardless of the random draw.
fn random_tall(m: usize, n: usize) -> (Mat<f64>, Vec<f64>) {
    let mut rng = rand::thread_rng();
    let noise: Vec<f64> = (0..m * n).map(|_| rng.r#gen()).collect();
    let a = Mat::from_fn(m, n, |i, j| {
        let base: f64 = if i == j { 3.0 } else { 0.0 };
        base + noise[j * m + i]
    });
    let b: Vec<f64> = (0..m).map(|_| rng.r#gen()).collect();
    (a, b)
}

/// Solve the normal equations (AᵗA)x = Aᵗb directly with full-pivot LU.
fn normal_equations_solution(a: &Mat<f64>, b: &Vec<f64>) -> Vec<f64> {
    let n = a.ncols();
    let at = a.transpose();
    let ata = &at * a;
    let mut atb = vec![0.0; n];
    a.mattransvec(b, &mut atb);
    let lu = faer::linalg::solvers::FullPivLu::new(ata.as_ref());
    let x_mat = faer::MatMut::from_column_major_slice_mut(&mut atb, n, 1);
    lu.solve_in_place_with_conj(faer::Conj::No, x_mat);
    atb
}

/// LSQR with tight tolerances must reproduce the direct least-squares
/// solution on a random tall system.
#[test]
fn lsqr_vs_normal_equations_on_random_tall() {
    let (m, n) = (12, 6);
    let (a, b) = random_tall(m, n);
    let x_direct = normal_equations_solution(&a, &b);

    let mut x_lsqr = vec![0.0; n];
    let mut solver = LsqrSolver::new(LsqrOptions {
        atol: 1e-12,
        btol: 1e-12,
        ..Default::default()
    });
    let stats = solver.solve(&a, &b, &mut x_lsqr).unwrap();
    assert!(stats.istop.converged(), "stop reason: {:?}", stats.istop);

    for i in 0..n {
        assert_abs_diff_eq!(x_lsqr[i], x_direct[i], epsilon = 1e-6);
    }
}

/// A square nonsingular system is solved to compatibility (stop code 1) and
/// matches the direct solution.
#[test]
fn lsqr_solves_square_system() {
    let n = 8;
    let (a, b) = random_tall(n, n);
    let x_direct = normal_equations_solution(&a, &b);

    let mut x_lsqr = vec![0.0; n];
    let mut solver = LsqrSolver::new(LsqrOptions {
        atol: 1e-12,
        btol: 1e-12,
        ..Default::default()
    });
    let stats = solver.solve(&a, &b, &mut x_lsqr).unwrap();
    assert!(
        matches!(
            stats.istop,
            StopReason::ResidualSmall | StopReason::ResidualAtMachinePrecision
        ),
        "stop reason: {:?}",
        stats.istop
    );
    for i in 0..n {
        assert_abs_diff_eq!(x_lsqr[i], x_direct[i], epsilon = 1e-6);
    }
}

/// For damp > 0 the reported norms must satisfy
/// r2norm² = r1norm² + damp²·‖x‖², and the damped solution must match the
/// direct solve of (AᵗA + damp²·I)x = Aᵗb.
#[test]
fn damped_lsqr_matches_regularized_normal_equations() {
    let (m, n) = (10, 4);
    let damp = 0.5;
    let (a, b) = random_tall(m, n);

    // Direct solve of the regularized normal equations.
    let at = a.transpose();
    let reg = Mat::from_fn(n, n, |i, j| if i == j { damp * damp } else { 0.0 });
    let ata = &at * &a + reg;
    let mut atb = vec![0.0; n];
    a.mattransvec(&b, &mut atb);
    let lu = faer::linalg::solvers::FullPivLu::new(ata.as_ref());
    let x_mat = faer::MatMut::from_column_major_slice_mut(&mut atb, n, 1);
    lu.solve_in_place_with_conj(faer::Conj::No, x_mat);
    let x_direct = atb;

    let mut x_lsqr = vec![0.0; n];
    let mut solver = LsqrSolver::new(LsqrOptions {
        damp,
        atol: 1e-12,
        btol: 1e-12,
        ..Default::default()
    });
    let stats = solver.solve(&a, &b, &mut x_lsqr).unwrap();

    for i in 0..n {
        assert_abs_diff_eq!(x_lsqr[i], x_direct[i], epsilon = 1e-6);
    }

    let xnorm_sq: f64 = x_lsqr.iter().map(|xi| xi * xi).sum();
    let lhs = stats.r2norm * stats.r2norm;
    let rhs = stats.r1norm * stats.r1norm + damp * damp * xnorm_sq;
    assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-8);
}

/// With a radius below the unconstrained solution norm, the solve must stop
/// on the boundary with ‖x‖ = radius.
#[test]
fn trust_region_caps_solution_norm() {
    let (m, n) = (12, 6);
    let (a, b) = random_tall(m, n);
    let x_free = normal_equations_solution(&a, &b);
    let free_norm: f64 = x_free.iter().map(|xi| xi * xi).sum::<f64>().sqrt();
    let radius = 0.5 * free_norm;

    let mut x = vec![0.0; n];
    let mut solver = LsqrSolver::new(LsqrOptions {
        radius: Some(radius),
        ..Default::default()
    });
    let stats = solver.solve(&a, &b, &mut x).unwrap();

    assert_eq!(stats.istop, StopReason::TrustRegionBoundary);
    assert!(stats.on_boundary);
    let xnorm: f64 = x.iter().map(|xi| xi * xi).sum::<f64>().sqrt();
    assert_abs_diff_eq!(xnorm, radius, epsilon = 1e-8);
}
