use crate::error::DigitNetError;
use crate::linalg::Vector;
use crate::nn::module::Module;
use crate::types::Real;

/// Rectified linear unit, `max(0, x)` element-wise.
#[derive(Debug, Clone, Default)]
pub struct ReLU<T> {
    last_input: Option<Vector<T>>,
}

impl<T: Real> ReLU<T> {
    pub fn new() -> Self {
        ReLU { last_input: None }
    }
}

impl<T: Real> Module<T> for ReLU<T> {
    fn forward(&mut self, input: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        let output = input.map(|x| if x > T::zero() { x } else { T::zero() });
        self.last_input = Some(input.clone());
        Ok(output)
    }

    /// Passes the gradient through where the cached input was strictly positive.
    fn backward(&mut self, grad_output: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        let input = self
            .last_input
            .as_ref()
            .ok_or_else(|| DigitNetError::BackwardBeforeForward(self.name().to_string()))?;
        grad_output.zip_map(input, |g, x| if x > T::zero() { g } else { T::zero() })
    }

    fn name(&self) -> &'static str {
        "ReLU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relu_forward() -> Result<(), DigitNetError> {
        let mut relu = ReLU::<f64>::new();
        let out = relu.forward(&Vector::from_vec(vec![-1.0, 0.0, 2.0]))?;
        assert_eq!(out.as_slice(), &[0.0, 0.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_relu_backward_masks_non_positive_inputs() -> Result<(), DigitNetError> {
        let mut relu = ReLU::<f64>::new();
        relu.forward(&Vector::from_vec(vec![-1.0, 0.0, 2.0]))?;
        let grad = relu.backward(&Vector::from_vec(vec![1.0, 1.0, 1.0]))?;
        assert_eq!(grad.as_slice(), &[0.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_relu_backward_before_forward() {
        let mut relu = ReLU::<f32>::new();
        assert!(matches!(
            relu.backward(&Vector::from_vec(vec![1.0])),
            Err(DigitNetError::BackwardBeforeForward(_))
        ));
    }

    #[test]
    fn test_relu_backward_length_mismatch() -> Result<(), DigitNetError> {
        let mut relu = ReLU::<f64>::new();
        relu.forward(&Vector::from_vec(vec![1.0, 2.0]))?;
        assert!(matches!(
            relu.backward(&Vector::from_vec(vec![1.0])),
            Err(DigitNetError::DimensionMismatch { .. })
        ));
        Ok(())
    }
}
