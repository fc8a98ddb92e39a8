// src/tensor/mod.rs

use approx::AbsDiffEq;
use crate::error::DigitNetError;
use crate::types::Scalar;
use std::ops::{Index, IndexMut};

mod debug;
pub mod io;
pub mod utils;

pub use utils::{checked_num_elements, flat_index, next_index, num_elements};

/// A dense, row-major, N-dimensional array.
///
/// The rank is fixed when the tensor is constructed; the shape is stored as a
/// plain dimension list and the elements in a flat `Vec` of length
/// `product(shape)`. A tensor with an empty shape has rank 0 and holds exactly
/// one element.
///
/// `Tensor` is a value type: cloning copies the data, nothing is shared.
/// Two tensors compare equal iff their shapes are identical and every
/// corresponding element compares equal.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T: Scalar> Tensor<T> {
    /// Creates a zero-filled tensor with the given shape.
    pub fn new(shape: &[usize]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Creates a tensor with the given shape, every element set to `value`.
    pub fn full(shape: &[usize], value: T) -> Self {
        Tensor {
            shape: shape.to_vec(),
            data: vec![value; num_elements(shape)],
        }
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Tensor {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    /// Creates a tensor from flat row-major data.
    ///
    /// # Errors
    /// Returns `DigitNetError::TensorCreationError` if `data.len()` does not
    /// match the number of elements described by `shape`.
    pub fn from_vec(data: Vec<T>, shape: Vec<usize>) -> Result<Self, DigitNetError> {
        if checked_num_elements(&shape) != Some(data.len()) {
            return Err(DigitNetError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { shape, data })
    }

    /// Creates a rank-1 tensor whose single dimension is `data.len()`.
    pub fn from_1d(data: Vec<T>) -> Self {
        Tensor {
            shape: vec![data.len()],
            data,
        }
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Checked element access.
    ///
    /// # Errors
    /// `IndexRankMismatch` if `index.len() != self.rank()`,
    /// `IndexOutOfBounds` if any component is outside its dimension.
    pub fn get(&self, index: &[usize]) -> Result<&T, DigitNetError> {
        let flat = flat_index(&self.shape, index)?;
        Ok(&self.data[flat])
    }

    /// Checked mutable element access. See [`Tensor::get`].
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T, DigitNetError> {
        let flat = flat_index(&self.shape, index)?;
        Ok(&mut self.data[flat])
    }

    /// Applies `f` to every element, producing a tensor of the same shape.
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        U: Scalar,
        F: FnMut(T) -> U,
    {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Combines two tensors of identical shape element by element.
    pub fn zip_map<F>(&self, other: &Tensor<T>, mut f: F) -> Result<Tensor<T>, DigitNetError>
    where
        F: FnMut(T, T) -> T,
    {
        if self.shape != other.shape {
            return Err(DigitNetError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
                operation: "zip_map".to_string(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Tensor {
            shape: self.shape.clone(),
            data,
        })
    }
}

impl<T> Tensor<T> {
    /// Returns the rank (number of dimensions) of the tensor.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the dimension sizes.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the total number of elements (1 for a rank-0 tensor).
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Flat row-major view of the elements.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat row-major view of the elements.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the tensor and returns its flat data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Iterates over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn flat_index_or_panic(&self, index: &[usize]) -> usize {
        match flat_index(&self.shape, index) {
            Ok(flat) => flat,
            Err(e) => panic!("Tensor index error: {}", e),
        }
    }
}

impl<T: Scalar> Default for Tensor<T> {
    /// Rank 0, a single zero element.
    fn default() -> Self {
        Tensor::scalar(T::zero())
    }
}

/// Unchecked-by-type element access; panics on a wrong-arity or
/// out-of-range index. Use [`Tensor::get`] for a `Result`.
impl<T> Index<&[usize]> for Tensor<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &T {
        let flat = self.flat_index_or_panic(index);
        &self.data[flat]
    }
}

impl<T> IndexMut<&[usize]> for Tensor<T> {
    fn index_mut(&mut self, index: &[usize]) -> &mut T {
        let flat = self.flat_index_or_panic(index);
        &mut self.data[flat]
    }
}

impl<T, const N: usize> Index<[usize; N]> for Tensor<T> {
    type Output = T;

    fn index(&self, index: [usize; N]) -> &T {
        &self[&index[..]]
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for Tensor<T> {
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        &mut self[&index[..]]
    }
}

impl<T> AbsDiffEq for Tensor<T>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}
