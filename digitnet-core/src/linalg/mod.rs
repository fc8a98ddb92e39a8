//! Rank-1 and rank-2 views over [`Tensor`](crate::tensor::Tensor) and the
//! dense products the layers need.

pub mod matrix;
pub mod matvec;
pub mod vector;

pub use matrix::Matrix;
pub use matvec::{matvec, matvec_transposed, outer};
pub use vector::Vector;

#[cfg(test)]
#[path = "linalg_test.rs"]
mod tests;
