//! Matrix-free operator backed by a pair of closures.
//!
//! LSQR only ever needs `A·x` and `Aᵗ·y`, so any pair of product routines is
//! a valid operator. `FnOperator` packages two closures with an explicit
//! shape; the solver cannot tell it apart from a stored matrix.

use crate::core::traits::{MatTransVec, MatVec, OpShape};

/// Linear operator defined by its forward and transpose product closures.
pub struct FnOperator<T, F, G>
where
    F: Fn(&[T], &mut [T]),
    G: Fn(&[T], &mut [T]),
{
    m: usize,
    n: usize,
    forward: F,
    transpose: G,
    _marker: std::marker::PhantomData<T>,
}

impl<T, F, G> FnOperator<T, F, G>
where
    F: Fn(&[T], &mut [T]),
    G: Fn(&[T], &mut [T]),
{
    /// Wrap `forward` (length-`n` in, length-`m` out) and `transpose`
    /// (length-`m` in, length-`n` out) as an `(m, n)` operator.
    ///
    /// Both closures must be pure functions of their argument; the solver
    /// assumes products do not depend on call order.
    pub fn new(m: usize, n: usize, forward: F, transpose: G) -> Self {
        Self { m, n, forward, transpose, _marker: std::marker::PhantomData }
    }
}

impl<T, F, G> MatVec<Vec<T>> for FnOperator<T, F, G>
where
    F: Fn(&[T], &mut [T]),
    G: Fn(&[T], &mut [T]),
{
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(x.len(), self.n, "Input vector x has incorrect length");
        assert_eq!(y.len(), self.m, "Output vector y has incorrect length");
        (self.forward)(x.as_slice(), y.as_mut_slice());
    }
}

impl<T, F, G> MatTransVec<Vec<T>> for FnOperator<T, F, G>
where
    F: Fn(&[T], &mut [T]),
    G: Fn(&[T], &mut [T]),
{
    fn mattransvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(x.len(), self.m, "Input vector x has incorrect length");
        assert_eq!(y.len(), self.n, "Output vector y has incorrect length");
        (self.transpose)(x.as_slice(), y.as_mut_slice());
    }
}

impl<T, F, G> OpShape for FnOperator<T, F, G>
where
    F: Fn(&[T], &mut [T]),
    G: Fn(&[T], &mut [T]),
{
    fn shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }
}
