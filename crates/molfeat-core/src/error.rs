use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeaturizeError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
    #[error("Embedding size {available} is too small for selected features (requires at least {required})")]
    EmbeddingTooSmall { required: usize, available: usize },
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tensor(#[from] candle_core::Error),
}

impl From<ndarray::ShapeError> for FeaturizeError {
    fn from(err: ndarray::ShapeError) -> Self {
        FeaturizeError::InvalidShape(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeaturizeError>;
