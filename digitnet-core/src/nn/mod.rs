// src/nn/mod.rs
// Layers, the layer trait, weight initialization and the loss.

pub mod init;
pub mod layer;
pub mod layers;
pub mod losses;
pub mod module;

// Re-export common items
pub use layer::Layer;
pub use layers::{FullyConnected, ReLU, SoftMax};
pub use losses::CrossEntropyLoss;
pub use module::Module;
