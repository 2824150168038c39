use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to encode chart options: {0}")]
    Encoding(String),

    #[error("option key not found: {0}")]
    KeyNotFound(String),

    #[error("unknown extra script: {0}")]
    UnknownScript(String),

    #[error("invalid script configuration: {0}")]
    InvalidConfig(String),
}
