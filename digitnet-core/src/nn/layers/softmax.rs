use crate::error::DigitNetError;
use crate::linalg::{matvec, Matrix, Vector};
use crate::nn::module::Module;
use crate::types::Real;

/// Normalizes its input into a probability distribution.
///
/// The forward pass subtracts the maximum before exponentiating, so the
/// output is unchanged by adding a constant to every input and large inputs
/// do not overflow.
#[derive(Debug, Clone, Default)]
pub struct SoftMax<T> {
    last_output: Option<Vector<T>>,
}

impl<T: Real> SoftMax<T> {
    pub fn new() -> Self {
        SoftMax { last_output: None }
    }

    /// Full Jacobian of the softmax at `p`:
    /// `J[i][j] = p_i (1 - p_j)` on the diagonal, `-p_i p_j` elsewhere.
    pub fn jacobian(p: &Vector<T>) -> Matrix<T> {
        let n = p.len();
        let mut jacobian = Matrix::new(n, n);
        for i in 0..n {
            for j in 0..n {
                jacobian[(i, j)] = if i == j {
                    p[i] * (T::one() - p[j])
                } else {
                    -p[i] * p[j]
                };
            }
        }
        jacobian
    }
}

impl<T: Real> Module<T> for SoftMax<T> {
    fn forward(&mut self, input: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        let max = input.max_value().ok_or_else(|| {
            DigitNetError::InvalidArgument("SoftMax::forward on an empty vector".to_string())
        })?;
        let exps = input.map(|x| (x - max).exp());
        let sum: T = exps.iter().copied().sum();
        let probs = exps.map(|e| e / sum);
        self.last_output = Some(probs.clone());
        Ok(probs)
    }

    fn backward(&mut self, grad_output: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        let probs = self
            .last_output
            .as_ref()
            .ok_or_else(|| DigitNetError::BackwardBeforeForward(self.name().to_string()))?;
        matvec(&Self::jacobian(probs), grad_output)
    }

    fn name(&self) -> &'static str {
        "SoftMax"
    }
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
