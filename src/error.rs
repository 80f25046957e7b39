use thiserror::Error;

/// Every failure the storefront database helper can surface.
///
/// Driver messages are carried as text so callers can log them without
/// depending on `rusqlite` directly.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Statement text rejected by the database (syntax, unknown table/column).
    /// Retrying the same statement will not help.
    #[error("Prepare error: {0}")]
    PrepareError(String),

    /// Binding or execution failed (constraint violation, type mismatch, busy).
    #[error("Execute error: {0}")]
    ExecuteError(String),

    /// A raw, non-prepared statement failed.
    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    /// Rejected before any statement reached the database.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    pub(crate) fn prepare(err: &rusqlite::Error) -> Self {
        DbError::PrepareError(err.to_string())
    }

    pub(crate) fn execute(err: &rusqlite::Error) -> Self {
        DbError::ExecuteError(err.to_string())
    }

    pub(crate) fn query(err: &rusqlite::Error) -> Self {
        DbError::QueryError(err.to_string())
    }

    /// True for driver failures a caller may reasonably retry (busy/locked database).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            DbError::ExecuteError(msg) | DbError::QueryError(msg) => {
                msg.contains("database is locked") || msg.contains("database table is locked")
            }
            DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}
