//! Matrix module: sparse and matrix-free operator backends.
//!
//! Dense `faer::Mat` operators get their trait impls in `core::wrappers`.

pub mod free;
pub mod sparse;

pub use free::FnOperator;
pub use sparse::CsrMatrix;
