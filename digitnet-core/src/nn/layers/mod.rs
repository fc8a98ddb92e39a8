// src/nn/layers/mod.rs

pub mod fully_connected;
pub mod relu;
pub mod softmax;

// Re-export key layer structs
pub use fully_connected::FullyConnected;
pub use relu::ReLU;
pub use softmax::SoftMax;
