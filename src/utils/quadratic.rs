//! Real roots of a scalar quadratic.
//!
//! Used by the trust-region check to intersect the search direction with the
//! boundary sphere. The evaluation avoids the cancellation-prone textbook
//! formula by computing the larger-magnitude root first and recovering the
//! other from the product of roots.

use num_traits::Float;

/// Real roots of `q2·s² + q1·s + q0 = 0`, in no particular order.
///
/// Degenerate cases: a linear equation (`q2 = 0`) yields its single root; a
/// negative discriminant or an identically-constant equation yields no roots.
pub fn roots_quadratic<T: Float>(q2: T, q1: T, q0: T) -> Vec<T> {
    let two = T::one() + T::one();
    let four = two + two;

    if q2 == T::zero() {
        if q1 == T::zero() {
            return Vec::new();
        }
        return vec![-q0 / q1];
    }

    let disc = q1 * q1 - four * q2 * q0;
    if disc < T::zero() {
        return Vec::new();
    }
    let sq = disc.sqrt();

    // Larger-magnitude root first; its sign opposes q1 so the addition
    // below never cancels.
    let qq = if q1 >= T::zero() {
        -(q1 + sq) / two
    } else {
        -(q1 - sq) / two
    };
    if qq == T::zero() {
        // q1 = 0 and disc = 0: double root at the origin.
        return vec![T::zero()];
    }
    vec![qq / q2, q0 / qq]
}
