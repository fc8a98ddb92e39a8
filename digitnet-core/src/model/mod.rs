//! The sequential network, its samples, and the prediction sink it reports to.

pub mod network;
pub mod sample;
pub mod sink;

pub use network::{
    Network, NetworkState, TestReport, TrainingReport, EARLY_STOPPING_THRESHOLD, INPUT_SIZE, OUTPUT_SIZE,
};
pub use sample::Sample;
pub use sink::{PredictionRecord, PredictionSink};
