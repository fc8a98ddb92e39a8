use crate::error::DigitNetError;
use crate::linalg::Vector;
use crate::nn::layers::{FullyConnected, ReLU, SoftMax};
use crate::nn::module::Module;
use crate::types::Real;

/// The closed set of layers a [`Network`](crate::model::Network) is built from.
#[derive(Debug, Clone)]
pub enum Layer<T> {
    FullyConnected(FullyConnected<T>),
    ReLU(ReLU<T>),
    SoftMax(SoftMax<T>),
}

impl<T: Real> Layer<T> {
    fn as_module(&self) -> &dyn Module<T> {
        match self {
            Layer::FullyConnected(layer) => layer,
            Layer::ReLU(layer) => layer,
            Layer::SoftMax(layer) => layer,
        }
    }

    fn as_module_mut(&mut self) -> &mut dyn Module<T> {
        match self {
            Layer::FullyConnected(layer) => layer,
            Layer::ReLU(layer) => layer,
            Layer::SoftMax(layer) => layer,
        }
    }

    pub fn forward(&mut self, input: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        self.as_module_mut().forward(input)
    }

    pub fn backward(&mut self, grad_output: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        self.as_module_mut().backward(grad_output)
    }

    pub fn name(&self) -> &'static str {
        self.as_module().name()
    }

    pub fn num_parameters(&self) -> usize {
        self.as_module().num_parameters()
    }
}

impl<T> From<FullyConnected<T>> for Layer<T> {
    fn from(layer: FullyConnected<T>) -> Self {
        Layer::FullyConnected(layer)
    }
}

impl<T> From<ReLU<T>> for Layer<T> {
    fn from(layer: ReLU<T>) -> Self {
        Layer::ReLU(layer)
    }
}

impl<T> From<SoftMax<T>> for Layer<T> {
    fn from(layer: SoftMax<T>) -> Self {
        Layer::SoftMax(layer)
    }
}
