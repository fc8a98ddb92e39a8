use approx::AbsDiffEq;
use crate::error::DigitNetError;
use crate::tensor::Tensor;
use crate::types::Scalar;
use std::ops::{Index, IndexMut};
use std::path::Path;

/// A rank-1 [`Tensor`] with 1-D indexing.
#[derive(Clone, PartialEq)]
pub struct Vector<T> {
    tensor: Tensor<T>,
}

impl<T: Scalar> Vector<T> {
    /// Creates a zero-filled vector of the given length.
    pub fn new(size: usize) -> Self {
        Vector {
            tensor: Tensor::new(&[size]),
        }
    }

    /// Creates a vector of the given length, every element set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Vector {
            tensor: Tensor::full(&[size], value),
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Vector {
            tensor: Tensor::from_1d(data),
        }
    }

    /// Wraps a tensor, which must have rank 1.
    ///
    /// # Errors
    /// `RankMismatch` for any other rank.
    pub fn from_tensor(tensor: Tensor<T>) -> Result<Self, DigitNetError> {
        if tensor.rank() != 1 {
            return Err(DigitNetError::RankMismatch {
                expected: 1,
                actual: tensor.rank(),
                operation: "Vector::from_tensor".to_string(),
            });
        }
        Ok(Vector { tensor })
    }

    /// Reads a vector from a tensor file. The file must hold a rank-1 tensor.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DigitNetError> {
        Self::from_tensor(Tensor::load(path)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DigitNetError> {
        self.tensor.save(path)
    }

    pub fn map<F: FnMut(T) -> T>(&self, f: F) -> Vector<T> {
        Vector {
            tensor: self.tensor.map(f),
        }
    }

    /// Element-wise combination of two vectors of equal length.
    pub fn zip_map<F: FnMut(T, T) -> T>(&self, other: &Vector<T>, f: F) -> Result<Vector<T>, DigitNetError> {
        self.check_same_len(other, "Vector::zip_map")?;
        Ok(Vector {
            tensor: self.tensor.zip_map(&other.tensor, f)?,
        })
    }

    /// `self -= scale * other`, in place.
    pub fn sub_scaled(&mut self, other: &Vector<T>, scale: T) -> Result<(), DigitNetError> {
        self.check_same_len(other, "Vector::sub_scaled")?;
        for (a, &b) in self.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *a -= scale * b;
        }
        Ok(())
    }

    /// Index of the first largest element, `None` for an empty vector.
    pub fn argmax(&self) -> Option<usize> {
        let data = self.as_slice();
        if data.is_empty() {
            return None;
        }
        let mut best = 0;
        for (i, &value) in data.iter().enumerate().skip(1) {
            if value > data[best] {
                best = i;
            }
        }
        Some(best)
    }

    /// Largest element, `None` for an empty vector.
    pub fn max_value(&self) -> Option<T> {
        self.argmax().map(|i| self[i])
    }

    pub(crate) fn check_same_len(&self, other: &Vector<T>, operation: &str) -> Result<(), DigitNetError> {
        if self.len() != other.len() {
            return Err(DigitNetError::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}

impl<T> Vector<T> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.tensor.numel()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[T] {
        self.tensor.data()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.tensor.data_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.tensor.iter()
    }

    /// The backing rank-1 tensor.
    pub fn tensor(&self) -> &Tensor<T> {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor<T> {
        self.tensor
    }
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Vector::from_vec(data)
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.tensor[[index]]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.tensor[[index]]
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> AbsDiffEq for Vector<T>
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
