//! Clone run error types
//!
//! Every variant aborts the run it occurs in. Entities persisted before the
//! failure are left in place.

use std::sync::Arc;

use thiserror::Error;

use super::StoreError;
use crate::cloner::CloneStage;

#[derive(Error, Debug)]
pub enum CloneError {
    /// The template graph violates an invariant of persisted data
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// An action points at a datasource that was not cloned in this run
    #[error("Action {action_id} references datasource {datasource_id} which was not cloned")]
    UnresolvedDatasource {
        action_id: String,
        datasource_id: String,
    },

    /// Cloning the datasource set failed; observed by a consumer of the shared result
    #[error("Datasource cloning failed: {0}")]
    DatasourceSet(Arc<CloneError>),

    /// The background datasource task panicked or was cancelled
    #[error("Background task failed: {0}")]
    BackgroundTask(String),

    /// Secret decryption failed for a datasource
    #[error("Failed to decrypt credentials of datasource '{datasource}': {reason}")]
    Decryption { datasource: String, reason: String },

    /// A store write returned an entity without identity
    #[error("Persisted {0} has no identity")]
    MissingIdentity(&'static str),

    /// The principal to clone for does not exist
    #[error("User {0} not found")]
    UserNotFound(String),

    /// The run attempted an out-of-order stage transition
    #[error("Invalid clone stage transition from {from:?} to {to:?}")]
    InvalidTransition { from: CloneStage, to: CloneStage },

    /// Persistence failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CloneError {
    /// Failures caused by the content of the template rather than the infrastructure
    pub fn is_template_error(&self) -> bool {
        match self {
            CloneError::InvalidTemplate(_) | CloneError::UnresolvedDatasource { .. } => true,
            CloneError::DatasourceSet(inner) => inner.is_template_error(),
            _ => false,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CloneError::InvalidTemplate(_) => "INVALID_TEMPLATE",
            CloneError::UnresolvedDatasource { .. } => "DATASOURCE_UNRESOLVED",
            CloneError::DatasourceSet(inner) => inner.error_code(),
            CloneError::BackgroundTask(_) => "BACKGROUND_TASK_FAILED",
            CloneError::Decryption { .. } => "DECRYPTION_FAILED",
            CloneError::MissingIdentity(_) => "MISSING_IDENTITY",
            CloneError::UserNotFound(_) => "NOT_FOUND",
            CloneError::InvalidTransition { .. } => "INTERNAL_ERROR",
            CloneError::Store(err) => err.error_code(),
        }
    }
}
