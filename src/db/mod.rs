//! The per-request database handle.
//!
//! A `Db` owns exactly one SQLite connection. Open it at the start of a request,
//! pass `&Db` / `&mut Db` down the call chain, and let it drop (or call
//! [`Db::close`]) at the end; an open transaction is rolled back on release.

use std::fmt;

use rusqlite::Connection;

use crate::error::DbError;
use crate::sqlite::config::DbOptions;

mod dml;
mod prepared;
mod read;
mod tx;

pub struct Db {
    conn: Option<Connection>,
    /// Set by `begin_transaction`; `in_transaction()` reads the live connection state.
    began_transaction: bool,
    database: String,
}

impl Db {
    /// Open `database` (a file path or `:memory:`) with default options.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` with the driver's message if the connection
    /// cannot be established.
    pub fn open(database: impl Into<String>) -> Result<Self, DbError> {
        Self::open_with(DbOptions::new(database))
    }

    /// Open a connection described by `opts`.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` with the driver's message if the connection
    /// cannot be established.
    pub fn open_with(opts: DbOptions) -> Result<Self, DbError> {
        let conn = opts.connect()?;
        tracing::info!(database = %opts.database, read_only = opts.read_only, "database opened");
        Ok(Self {
            conn: Some(conn),
            began_transaction: false,
            database: opts.database,
        })
    }

    /// Release the connection, rolling back an open transaction first.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` if the driver fails to close the connection.
    pub fn close(mut self) -> Result<(), DbError> {
        self.release_transaction("close");
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        conn.close()
            .map_err(|(_, e)| DbError::ConnectionError(format!("{}: {e}", self.database)))?;
        tracing::info!(database = %self.database, "database closed");
        Ok(())
    }

    /// Rowid generated by the most recent successful insert on this connection.
    ///
    /// # Errors
    /// Returns `DbError::InvalidState` if the connection is already released.
    pub fn last_insert_id(&self) -> Result<i64, DbError> {
        Ok(self.conn()?.last_insert_rowid())
    }

    /// Whether the connection has an open transaction, however it was started.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.conn.as_ref().is_some_and(|conn| !conn.is_autocommit())
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    pub(crate) fn conn(&self) -> Result<&Connection, DbError> {
        self.conn
            .as_ref()
            .ok_or_else(|| DbError::InvalidState("database connection already closed".into()))
    }

    fn release_transaction(&mut self, ctx: &str) {
        if !self.in_transaction() {
            self.began_transaction = false;
            return;
        }
        tracing::warn!(database = %self.database, "rolling back open transaction on {ctx}");
        if let Err(err) = self.rollback_transaction() {
            tracing::warn!(database = %self.database, error = %err, "rollback on {ctx} failed");
        }
    }
}

impl Drop for Db {
    fn drop(&mut self) {
        if self.conn.is_some() {
            self.release_transaction("drop");
        }
    }
}

impl fmt::Debug for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("database", &self.database)
            .field("open", &self.conn.is_some())
            .field("in_transaction", &self.in_transaction())
            .finish()
    }
}
