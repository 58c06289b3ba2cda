use thiserror::Error;

/// Errors surfaced by the data-access layer.
///
/// Not-found is deliberately absent: point lookups return `Ok(None)` so
/// callers can tell "no such row" apart from "the query itself failed".
#[derive(Error, Debug)]
pub enum DbError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("email '{email}' already exists")]
    DuplicateEmail { email: String },

    #[error("query execution failed: {0}")]
    Execution(#[from] sqlx::Error),
}

impl DbError {
    pub fn validation<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn duplicate_email<S: Into<String>>(email: S) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// True when the underlying driver reported a unique-constraint violation.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        err.as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false)
    }
}
