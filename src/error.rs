use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Configuration error: {0}")]
    Config(String),
    /// Pre-submission form errors. The message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Generation service error: {0}")]
    Service(String),
    #[error("Response error: {0}")]
    Response(String),
    /// The service answered 200 but carried no usable text. Treated as a
    /// service failure, never substituted with placeholder output.
    #[error("生成失败，服务未返回内容")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, PromptError>;
