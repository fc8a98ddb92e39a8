//! Core of the DigitNet digit classifier: a dense N-dimensional [`Tensor`]
//! with a line-oriented text format, rank-1/rank-2 views, hand-written
//! layers with fused SGD updates, and the [`Network`] that trains them one
//! sample at a time.

pub mod error;
pub mod linalg;
pub mod model;
pub mod nn;
pub mod tensor;
pub mod types;

pub use error::DigitNetError;
pub use linalg::{matvec, Matrix, Vector};
pub use model::{
    Network, NetworkState, PredictionRecord, PredictionSink, Sample, TestReport, TrainingReport, INPUT_SIZE,
    OUTPUT_SIZE,
};
pub use nn::{CrossEntropyLoss, FullyConnected, Layer, Module, ReLU, SoftMax};
pub use tensor::Tensor;
pub use types::{Real, Scalar};

// Re-export traits required by public functions/structs
pub use num_traits;
