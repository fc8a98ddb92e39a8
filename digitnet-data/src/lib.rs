//! Data side of DigitNet: the [`Dataset`] trait, IDX (MNIST) decoding and the
//! prediction log file written during evaluation.

pub mod dataset;
pub mod mnist;
pub mod prediction_log;

// Re-export main components
pub use dataset::Dataset;
pub use mnist::{normalize, one_hot, MnistDataset};
pub use prediction_log::PredictionLog;
