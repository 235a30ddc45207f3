//! Error types for the orgman system.
//!
//! Display strings double as the HTTP `detail` messages, so variants
//! carry human-facing labels rather than internal identifiers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrgError {
    /// Missing organization (or other entity) on a point lookup.
    #[error("{entity} not found")]
    NotFound { entity: String, key: String },

    /// Uniqueness violation on a master-table key.
    #[error("{entity} already exists")]
    AlreadyExists { entity: String },

    /// Authorization or credential mismatch on an admin-gated operation.
    #[error("Unauthorized: {reason}")]
    Forbidden { reason: String },

    /// Login or token failure.
    #[error("{reason}")]
    Unauthorized { reason: String },

    /// Token past its expiry — distinct from a generally invalid token.
    #[error("Token has expired")]
    TokenExpired,

    #[error("{message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

pub type OrgResult<T> = Result<T, OrgError>;
