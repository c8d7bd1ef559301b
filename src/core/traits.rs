//! Core linear-algebra traits for krylsq.

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Matrix-transpose–vector product: y ← Aᵗ x.
pub trait MatTransVec<V> {
    /// Compute y = Aᵗ · x.
    fn mattransvec(&self, x: &V, y: &mut V);
}

/// Row/column extent of a linear operator.
///
/// The solver reads the shape once, up front, to size its work vectors and
/// validate the right-hand side. `matvec` maps length-`n` to length-`m`;
/// `mattransvec` maps length-`m` to length-`n`.
pub trait OpShape {
    /// Returns `(m, n)`.
    fn shape(&self) -> (usize, usize);
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd + From<f64>;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}
