use crate::error::DigitNetError;
use crate::linalg::{matvec, matvec_transposed, outer, Matrix, Vector};
use crate::nn::init::he_normal;
use crate::nn::module::Module;
use crate::types::Real;
use log::debug;
use rand::Rng;

/// Affine layer `y = W·x + b` with a fused SGD update in `backward`.
///
/// `W` is `output_size × input_size`, `b` has `output_size` elements.
#[derive(Debug, Clone)]
pub struct FullyConnected<T> {
    weights: Matrix<T>,
    bias: Vector<T>,
    learning_rate: T,
    last_input: Option<Vector<T>>,
}

impl<T: Real> FullyConnected<T> {
    /// Creates a layer with He-initialized weights drawn from the thread RNG
    /// and zero biases.
    pub fn new(input_size: usize, output_size: usize, learning_rate: T) -> Result<Self, DigitNetError> {
        Self::with_rng(input_size, output_size, learning_rate, &mut rand::thread_rng())
    }

    /// Same as [`FullyConnected::new`] with an explicit RNG, for reproducible weights.
    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        learning_rate: T,
        rng: &mut R,
    ) -> Result<Self, DigitNetError> {
        let weights = he_normal(output_size, input_size, rng)?;
        Ok(FullyConnected {
            weights,
            bias: Vector::new(output_size),
            learning_rate,
            last_input: None,
        })
    }

    /// Builds a layer from explicit parameters.
    ///
    /// # Errors
    /// `DimensionMismatch` if `bias.len() != weights.rows()`.
    pub fn from_parameters(weights: Matrix<T>, bias: Vector<T>, learning_rate: T) -> Result<Self, DigitNetError> {
        if bias.len() != weights.rows() {
            return Err(DigitNetError::DimensionMismatch {
                expected: weights.rows(),
                actual: bias.len(),
                operation: "FullyConnected::from_parameters".to_string(),
            });
        }
        Ok(FullyConnected {
            weights,
            bias,
            learning_rate,
            last_input: None,
        })
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn output_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn weights(&self) -> &Matrix<T> {
        &self.weights
    }

    pub fn bias(&self) -> &Vector<T> {
        &self.bias
    }

    pub fn learning_rate(&self) -> T {
        self.learning_rate
    }
}

impl<T: Real> Module<T> for FullyConnected<T> {
    fn forward(&mut self, input: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        let mut output = matvec(&self.weights, input)?;
        for (o, &b) in output.as_mut_slice().iter_mut().zip(self.bias.as_slice()) {
            *o += b;
        }
        self.last_input = Some(input.clone());
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        let input = self
            .last_input
            .as_ref()
            .ok_or_else(|| DigitNetError::BackwardBeforeForward(self.name().to_string()))?;
        self.bias.check_same_len(grad_output, "FullyConnected::backward")?;

        // Input gradient uses the weights as they were during forward.
        let grad_input = matvec_transposed(&self.weights, grad_output)?;

        let grad_weights = outer(grad_output, input);
        self.weights.sub_scaled(&grad_weights, self.learning_rate)?;
        self.bias.sub_scaled(grad_output, self.learning_rate)?;

        debug!(
            "FullyConnected {}x{} updated with lr {}",
            self.output_size(),
            self.input_size(),
            self.learning_rate
        );
        Ok(grad_input)
    }

    fn name(&self) -> &'static str {
        "FullyConnected"
    }

    fn num_parameters(&self) -> usize {
        self.weights.as_slice().len() + self.bias.len()
    }
}

#[cfg(test)]
#[path = "fully_connected_test.rs"]
mod tests;
