//! Authentication error types.

use orgman_core::error::OrgError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for OrgError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => OrgError::Unauthorized {
                reason: err.to_string(),
            },
            AuthError::TokenExpired => OrgError::TokenExpired,
            AuthError::TokenInvalid(_) => OrgError::Unauthorized {
                reason: "Could not validate credentials".into(),
            },
            AuthError::Crypto(msg) => OrgError::Crypto(msg),
        }
    }
}
