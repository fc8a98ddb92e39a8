use crate::error::DigitNetError;
use crate::linalg::Vector;
use crate::types::Real;

/// Cross-entropy between a predicted distribution and a (one-hot) target.
///
/// Predictions are clamped to at least `T::epsilon()` before the logarithm
/// and before division, so a zero probability never produces an infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    pub fn new() -> Self {
        CrossEntropyLoss
    }

    /// `-Σ target_i · ln(max(pred_i, ε))`
    pub fn forward<T: Real>(&self, pred: &Vector<T>, target: &Vector<T>) -> Result<T, DigitNetError> {
        pred.check_same_len(target, "CrossEntropyLoss::forward")?;
        let loss = pred
            .iter()
            .zip(target.iter())
            .map(|(&p, &t)| t * clamp(p).ln())
            .sum::<T>();
        Ok(-loss)
    }

    /// Element-wise `-target_i / max(pred_i, ε)`.
    pub fn backward<T: Real>(&self, pred: &Vector<T>, target: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        pred.zip_map(target, |p, t| -t / clamp(p))
    }
}

fn clamp<T: Real>(p: T) -> T {
    p.max(T::epsilon())
}
