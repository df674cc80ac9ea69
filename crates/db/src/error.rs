//! Errors raised by the note store.

use notty_core::types::DbId;

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failure of a note-store operation.
///
/// `NotFound` and `Integrity` are caller-visible outcomes; `Database` wraps
/// anything else the driver reports.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed row does not exist or is owned by someone else.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A write referenced a row that does not exist for this owner.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    /// Foreign-key violations reported by the engine become
    /// [`StoreError::Integrity`]; everything else is passed through.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::Integrity(format!(
                    "Referenced row does not exist (constraint {constraint})"
                ));
            }
        }
        StoreError::Database(err)
    }
}
