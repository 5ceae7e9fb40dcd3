use thiserror::Error;

use crate::auth::JwtError;

/// Errors that stop the server from starting
///
/// Request-time failures are [`crate::AppError`]; these never reach a client.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("JWT setup failed: {0}")]
    Jwt(#[from] JwtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
