//! Database-specific error types and conversions.

use orgman_core::error::OrgError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    /// A statement failed at execution or its result could not be
    /// decoded.
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    /// Unique-index violation. This is how a create that lost the
    /// pre-check race still surfaces as a conflict.
    #[error("Duplicate record: {entity}")]
    Duplicate { entity: String },
}

impl From<DbError> for OrgError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, key } => OrgError::NotFound { entity, key },
            DbError::Duplicate { entity } => OrgError::AlreadyExists { entity },
            other => OrgError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_failures_convert_to_database_errors() {
        let err: OrgError = DbError::Query("Expected `table name`".into()).into();
        assert!(matches!(err, OrgError::Database(_)));
        assert!(err.to_string().starts_with("Database error: Query failed"));
    }

    #[test]
    fn duplicate_converts_to_already_exists() {
        let err: OrgError = DbError::Duplicate {
            entity: "Organization name".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Organization name already exists");
    }
}
