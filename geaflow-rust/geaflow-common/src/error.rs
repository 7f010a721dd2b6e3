use thiserror::Error;

pub type GeaFlowResult<T> = Result<T, GeaFlowError>;

#[derive(Debug, Error)]
pub enum GeaFlowError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("internal error: {0}")]
    Internal(String),
}
