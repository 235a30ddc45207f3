//! orgman auth — password hashing/verification and JWT access token
//! issuance/validation (the credential service).

pub mod config;
pub mod error;
pub mod password;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use token::{AccessTokenClaims, TokenIdentity};
