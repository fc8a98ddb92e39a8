use approx::AbsDiffEq;
use crate::error::DigitNetError;
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::ops::{Index, IndexMut};
use std::path::Path;

/// A rank-2 [`Tensor`] (rows × cols, row-major) with 2-D indexing.
#[derive(Clone, PartialEq)]
pub struct Matrix<T> {
    tensor: Tensor<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Creates a zero-filled `rows × cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            tensor: Tensor::new(&[rows, cols]),
        }
    }

    /// Creates a `rows × cols` matrix with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Matrix {
            tensor: Tensor::full(&[rows, cols], value),
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    /// `TensorCreationError` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, DigitNetError> {
        Ok(Matrix {
            tensor: Tensor::from_vec(data, vec![rows, cols])?,
        })
    }

    /// Wraps a tensor, which must have rank 2.
    ///
    /// # Errors
    /// `RankMismatch` for any other rank.
    pub fn from_tensor(tensor: Tensor<T>) -> Result<Self, DigitNetError> {
        if tensor.rank() != 2 {
            return Err(DigitNetError::RankMismatch {
                expected: 2,
                actual: tensor.rank(),
                operation: "Matrix::from_tensor".to_string(),
            });
        }
        Ok(Matrix { tensor })
    }

    /// Reads a matrix from a tensor file. The file must hold a rank-2 tensor.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DigitNetError> {
        Self::from_tensor(Tensor::load(path)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DigitNetError> {
        self.tensor.save(path)
    }

    /// `self -= scale * other`, in place. Both matrices must have the same shape.
    pub fn sub_scaled(&mut self, other: &Matrix<T>, scale: T) -> Result<(), DigitNetError> {
        if self.tensor.shape() != other.tensor.shape() {
            return Err(DigitNetError::ShapeMismatch {
                expected: self.tensor.shape().to_vec(),
                actual: other.tensor.shape().to_vec(),
                operation: "Matrix::sub_scaled".to_string(),
            });
        }
        for (a, &b) in self.tensor.data_mut().iter_mut().zip(other.tensor.data()) {
            *a -= scale * b;
        }
        Ok(())
    }

    /// Returns the transposed `cols × rows` matrix.
    pub fn transpose(&self) -> Matrix<T> {
        let mut out = Matrix::new(self.cols(), self.rows());
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                out[(c, r)] = self[(r, c)];
            }
        }
        out
    }
}

impl<T> Matrix<T> {
    pub fn rows(&self) -> usize {
        self.tensor.shape()[0]
    }

    pub fn cols(&self) -> usize {
        self.tensor.shape()[1]
    }

    /// Contiguous slice of row `r`.
    pub fn row(&self, r: usize) -> &[T] {
        let cols = self.cols();
        &self.tensor.data()[r * cols..(r + 1) * cols]
    }

    pub fn as_slice(&self) -> &[T] {
        self.tensor.data()
    }

    /// The backing rank-2 tensor.
    pub fn tensor(&self) -> &Tensor<T> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<T> {
        self.tensor
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.tensor[[row, col]]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.tensor[[row, col]]
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for r in 0..self.rows() {
            list.entry(&self.row(r));
        }
        list.finish()
    }
}

impl<T> AbsDiffEq for Matrix<T>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.tensor.abs_diff_eq(&other.tensor, epsilon)
    }
}
