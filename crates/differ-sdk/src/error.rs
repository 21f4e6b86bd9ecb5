use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("normalization failed: {0}")]
    Normalize(#[from] differ_normalize::NormalizeError),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
