//! Persistence error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity expected to exist was missing
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Entity cannot be written without this field
    #[error("{entity} is missing required field {field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Database(_) => "DATABASE_ERROR",
            StoreError::Serialization(_) => "SERIALIZATION_ERROR",
            StoreError::NotFound { .. } => "NOT_FOUND",
            StoreError::MissingField { .. } => "VALIDATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = StoreError::not_found("application", "app-1");
        assert_eq!(err.to_string(), "application app-1 not found");
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_missing_field() {
        let err = StoreError::MissingField {
            entity: "datasource",
            field: "workspace_id",
        };
        assert_eq!(
            err.to_string(),
            "datasource is missing required field workspace_id"
        );
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_serialization_error() {
        let err: StoreError = serde_json::from_str::<Vec<String>>("{")
            .unwrap_err()
            .into();
        assert!(!err.is_not_found());
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
