use thiserror::Error;

/// Custom error type for the DigitNet crates.
///
/// Every fallible operation in the workspace returns this type. Variants fall
/// into three families: configuration errors (bad settings, mismatched ranks
/// or dimensions), parse errors (truncated or corrupt tensor text, malformed
/// dataset headers) and index errors (wrong-arity or out-of-range access).
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum DigitNetError {
    #[error("Rank mismatch: expected rank {expected}, got {actual} during operation {operation}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual} during operation {operation}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Index rank mismatch: index has {actual} components but tensor has rank {expected}")]
    IndexRankMismatch { expected: usize, actual: usize },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Tensor parse error at line {line}: {message}")]
    TensorParse { line: usize, message: String },

    #[error("Invalid magic number: expected {expected:#010x}, got {actual:#010x}")]
    InvalidMagicNumber { expected: u32, actual: u32 },

    #[error("Dataset format error: {0}")]
    DatasetFormat(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Invalid value {value:?} for configuration key {key}: {reason}")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network is not configured: {0}")]
    NotConfigured(String),

    #[error("Network layers are already configured")]
    AlreadyConfigured,

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Backward called on layer {0} before any forward pass")]
    BackwardBeforeForward(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DigitNetError {
    fn from(err: std::io::Error) -> Self {
        DigitNetError::Io(err.to_string())
    }
}
