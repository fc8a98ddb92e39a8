use crate::error::DigitNetError;
use crate::linalg::Vector;
use crate::types::Real;

/// The base trait for every layer of a [`Network`](crate::model::Network).
///
/// A module is a stateful computation unit: `forward` caches whatever the
/// matching `backward` needs, and `backward` consumes the gradient of the
/// loss with respect to this module's output and returns the gradient with
/// respect to its input. Modules that own parameters update them as a side
/// effect of `backward`; there is no separate optimizer step.
///
/// Calls must alternate strictly, one `forward` then at most one `backward`
/// per sample.
pub trait Module<T: Real>: std::fmt::Debug {
    /// Performs a forward pass and caches the state needed by `backward`.
    fn forward(&mut self, input: &Vector<T>) -> Result<Vector<T>, DigitNetError>;

    /// Propagates `grad_output` back through the module.
    ///
    /// # Errors
    /// `BackwardBeforeForward` if no forward pass has populated the cache.
    fn backward(&mut self, grad_output: &Vector<T>) -> Result<Vector<T>, DigitNetError>;

    /// Short human-readable name, used in log messages.
    fn name(&self) -> &'static str;

    /// Number of learnable scalars owned by this module.
    fn num_parameters(&self) -> usize {
        0
    }
}
