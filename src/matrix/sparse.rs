// CSR operator with forward and transpose products.

use crate::core::traits::{MatTransVec, MatVec, OpShape};
use num_traits::Float;

/// Compressed-sparse-row matrix usable as an LSQR operator.
///
/// Stores the usual row-pointer/column-index/value triplet arrays. Both the
/// forward product and the transpose product walk the same row-major
/// storage, so no column-major copy is ever built.
pub struct CsrMatrix<T> {
    nrows: usize,
    ncols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T: Float> CsrMatrix<T> {
    /// Build a CSR from raw row-ptr, col-idx, and values.
    pub fn from_csr(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), nrows + 1, "row_ptr must have nrows + 1 entries");
        assert_eq!(col_idx.len(), values.len(), "col_idx and values must match");
        assert_eq!(*row_ptr.last().unwrap(), values.len(), "row_ptr must end at nnz");
        assert!(col_idx.iter().all(|&j| j < ncols), "column index out of range");
        Self { nrows, ncols, row_ptr, col_idx, values }
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

impl<T: Float> MatVec<Vec<T>> for CsrMatrix<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(x.len(), self.ncols, "Input vector x has incorrect length");
        assert_eq!(y.len(), self.nrows, "Output vector y has incorrect length");
        for i in 0..self.nrows {
            let mut acc = T::zero();
            for k in self.row_ptr[i]..self.row_ptr[i + 1] {
                acc = acc + self.values[k] * x[self.col_idx[k]];
            }
            y[i] = acc;
        }
    }
}

impl<T: Float> MatTransVec<Vec<T>> for CsrMatrix<T> {
    fn mattransvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(x.len(), self.nrows, "Input vector x has incorrect length");
        assert_eq!(y.len(), self.ncols, "Output vector y has incorrect length");
        for yj in y.iter_mut() {
            *yj = T::zero();
        }
        // Scatter row i of A into the columns it touches.
        for i in 0..self.nrows {
            let xi = x[i];
            for k in self.row_ptr[i]..self.row_ptr[i + 1] {
                y[self.col_idx[k]] = y[self.col_idx[k]] + self.values[k] * xi;
            }
        }
    }
}

impl<T> OpShape for CsrMatrix<T> {
    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
}
