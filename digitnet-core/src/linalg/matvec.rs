use crate::error::DigitNetError;
use crate::linalg::{Matrix, Vector};
use crate::types::Scalar;

/// Dense matrix-vector product `out[r] = Σ_c mat[r, c] * vec[c]`.
///
/// Accumulation is row by row, columns in increasing order, starting from zero.
///
/// # Errors
/// `DimensionMismatch` if `mat.cols() != vec.len()`.
pub fn matvec<T: Scalar>(mat: &Matrix<T>, vec: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
    if mat.cols() != vec.len() {
        return Err(DigitNetError::DimensionMismatch {
            expected: mat.cols(),
            actual: vec.len(),
            operation: "matvec".to_string(),
        });
    }

    let x = vec.as_slice();
    let mut out = Vector::new(mat.rows());
    for (r, acc) in out.as_mut_slice().iter_mut().enumerate() {
        for (&m, &v) in mat.row(r).iter().zip(x) {
            *acc += m * v;
        }
    }
    Ok(out)
}

/// Transposed product `out[c] = Σ_r mat[r, c] * vec[r]`, i.e. `matᵀ · vec`,
/// without materializing the transpose.
///
/// # Errors
/// `DimensionMismatch` if `mat.rows() != vec.len()`.
pub fn matvec_transposed<T: Scalar>(mat: &Matrix<T>, vec: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
    if mat.rows() != vec.len() {
        return Err(DigitNetError::DimensionMismatch {
            expected: mat.rows(),
            actual: vec.len(),
            operation: "matvec_transposed".to_string(),
        });
    }

    let mut out = Vector::new(mat.cols());
    for (r, &v) in vec.iter().enumerate() {
        for (acc, &m) in out.as_mut_slice().iter_mut().zip(mat.row(r)) {
            *acc += m * v;
        }
    }
    Ok(out)
}

/// Outer product `a ⊗ bᵀ`, an `a.len() × b.len()` matrix.
pub fn outer<T: Scalar>(a: &Vector<T>, b: &Vector<T>) -> Matrix<T> {
    let mut out = Matrix::new(a.len(), b.len());
    for (r, &x) in a.iter().enumerate() {
        for (c, &y) in b.iter().enumerate() {
            out[(r, c)] = x * y;
        }
    }
    out
}

#[cfg(test)]
#[path = "matvec_test.rs"]
mod tests;
