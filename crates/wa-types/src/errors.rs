//! Error types and conversions

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("OAuth protocol error: {0}")]
    Protocol(String),

    #[error("The sign in flow was canceled")]
    Canceled,

    #[error("The sign in flow timed out")]
    Timeout,

    #[error("Browser surface error: {0}")]
    Surface(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Cryptography error: {0}")]
    Crypto(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
