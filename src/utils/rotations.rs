//! Plane-rotation scalar helpers for the bidiagonal recursion.
//!
//! The LSQR recursion eliminates one entry at a time with 2×2 plane (Givens)
//! rotations; all it ever needs from a rotation is the hypotenuse and the
//! cosine/sine pair. `norm_of2`/`norm_of4` are small-arity Euclidean
//! combines, cheaper than forming a vector and taking its norm.

use num_traits::Float;

/// `sqrt(a² + b²)` without forming a vector.
pub fn norm_of2<T: Float>(a: T, b: T) -> T {
    (a * a + b * b).sqrt()
}

/// `sqrt(a² + b² + c² + d²)`; used for the 4-term `anorm` update.
pub fn norm_of4<T: Float>(a: T, b: T, c: T, d: T) -> T {
    (a * a + b * b + c * c + d * d).sqrt()
}

/// Construct the plane rotation that zeroes `b` against `a`.
///
/// Returns `(cs, sn, r)` with `r = sqrt(a² + b²)`, `cs = a/r`, `sn = b/r`,
/// so that `[cs sn; -sn cs]·[a; b] = [r; 0]`. When both inputs are zero the
/// identity rotation `(1, 0, 0)` is returned.
pub fn plane_rotation<T: Float>(a: T, b: T) -> (T, T, T) {
    let r = norm_of2(a, b);
    if r == T::zero() {
        (T::one(), T::zero(), T::zero())
    } else {
        (a / r, b / r, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn norm_of2_matches_hypot() {
        assert_abs_diff_eq!(norm_of2(3.0, 4.0), 5.0, epsilon = 1e-15);
        assert_abs_diff_eq!(norm_of2(-3.0, 4.0), 5.0, epsilon = 1e-15);
        assert_eq!(norm_of2(0.0, 0.0), 0.0);
    }

    #[test]
    fn norm_of4_matches_vector_norm() {
        let v: [f64; 4] = [1.0, -2.0, 3.0, 0.5];
        let expected = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert_abs_diff_eq!(norm_of4(v[0], v[1], v[2], v[3]), expected, epsilon = 1e-15);
    }

    #[test]
    fn rotation_zeroes_second_component() {
        let (cs, sn, r) = plane_rotation(3.0, 4.0);
        assert_abs_diff_eq!(cs * 3.0 + sn * 4.0, r, epsilon = 1e-15);
        assert_abs_diff_eq!(-sn * 3.0 + cs * 4.0, 0.0, epsilon = 1e-15);
        // Rotations preserve norms.
        assert_abs_diff_eq!(cs * cs + sn * sn, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn rotation_of_zero_is_identity() {
        let (cs, sn, r) = plane_rotation(0.0f64, 0.0);
        assert_eq!((cs, sn, r), (1.0, 0.0, 0.0));
    }
}
