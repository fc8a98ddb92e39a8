use crate::error::DigitNetError;

/// Number of elements described by a shape. The empty shape (rank 0) has one element.
pub fn num_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Like [`num_elements`], but `None` when the product overflows `usize`.
pub fn checked_num_elements(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Row-major flat position of a multi-index:
/// `flat = Σ_i index[i] * Π_{j>i} shape[j]`.
///
/// # Errors
/// `IndexRankMismatch` if `index.len() != shape.len()`, `IndexOutOfBounds`
/// if some `index[i] >= shape[i]`.
pub fn flat_index(shape: &[usize], index: &[usize]) -> Result<usize, DigitNetError> {
    if index.len() != shape.len() {
        return Err(DigitNetError::IndexRankMismatch {
            expected: shape.len(),
            actual: index.len(),
        });
    }

    let mut flat = 0;
    let mut dim_product = 1;
    for (&i, &dim) in index.iter().zip(shape.iter()).rev() {
        if i >= dim {
            return Err(DigitNetError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: shape.to_vec(),
            });
        }
        flat += i * dim_product;
        dim_product *= dim;
    }
    Ok(flat)
}

/// Advances `index` to the next position in row-major order (last component
/// varies fastest). Returns `false` once the index wraps past the last element,
/// leaving it at all zeros.
pub fn next_index(index: &mut [usize], shape: &[usize]) -> bool {
    for d in (0..index.len()).rev() {
        index[d] += 1;
        if index[d] < shape[d] {
            return true;
        }
        index[d] = 0;
    }
    false
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
