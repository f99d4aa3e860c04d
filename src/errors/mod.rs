//! Domain-specific error types for the workspace cloner
//!
//! # Error Categories
//!
//! - **StoreError**: persistence failures (database, serialization, missing rows)
//! - **CloneError**: failures that abort a clone run
//!
//! Non-fatal conditions are not errors: a skipped run is a
//! [`CloneOutcome::Skipped`](crate::cloner::CloneOutcome) and a dangling
//! layout reference is a
//! [`ReferenceInconsistency`](crate::cloner::ReferenceInconsistency) in the
//! run report.
//!
//! # Examples
//!
//! ```rust
//! use workspace_cloner::errors::CloneError;
//!
//! let err = CloneError::UnresolvedDatasource {
//!     action_id: "action-1".to_string(),
//!     datasource_id: "ds-9".to_string(),
//! };
//! assert_eq!(err.error_code(), "DATASOURCE_UNRESOLVED");
//! assert!(err.is_template_error());
//! ```

pub mod clone;
pub mod store;

pub use clone::CloneError;
pub use store::StoreError;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for clone operations
pub type CloneResult<T> = Result<T, CloneError>;
