use std::time::Duration;

use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};

use crate::db::Db;
use crate::error::DbError;

const MEMORY_DATABASE: &str = ":memory:";

/// Options for opening the storefront database.
///
/// Deserializes from a config file with every field but `database` optional:
/// ```rust
/// use storefront_db::prelude::*;
///
/// let opts: DbOptions = serde_json::from_str(r#"{"database": "shop.db", "read_only": true}"#)?;
/// assert!(opts.read_only);
/// assert!(opts.foreign_keys);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbOptions {
    /// File path, `:memory:`, or a `file:` URI.
    pub database: String,
    pub read_only: bool,
    pub create_if_missing: bool,
    pub busy_timeout_ms: u64,
    /// Switch file databases to `journal_mode = WAL` on open.
    pub wal: bool,
    pub foreign_keys: bool,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            database: MEMORY_DATABASE.to_string(),
            read_only: false,
            create_if_missing: true,
            busy_timeout_ms: 5_000,
            wal: true,
            foreign_keys: true,
        }
    }
}

impl DbOptions {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn builder(database: impl Into<String>) -> DbOptionsBuilder {
        DbOptionsBuilder::new(database)
    }

    fn is_memory(&self) -> bool {
        self.database == MEMORY_DATABASE || self.database.contains("mode=memory")
    }

    fn open_flags(&self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if self.read_only {
            base | OpenFlags::SQLITE_OPEN_READ_ONLY
        } else if self.create_if_missing {
            base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
        } else {
            base | OpenFlags::SQLITE_OPEN_READ_WRITE
        }
    }

    /// Open a driver connection and apply the session pragmas.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` carrying the driver message.
    pub(crate) fn connect(&self) -> Result<Connection, DbError> {
        let connect_err =
            |e: rusqlite::Error| DbError::ConnectionError(format!("{}: {e}", self.database));

        let conn = Connection::open_with_flags(&self.database, self.open_flags())
            .map_err(connect_err)?;
        conn.busy_timeout(Duration::from_millis(self.busy_timeout_ms))
            .map_err(connect_err)?;
        // the bundled build enforces foreign keys by default, so always set it
        conn.pragma_update(None, "foreign_keys", self.foreign_keys)
            .map_err(connect_err)?;
        if self.wal && !self.read_only && !self.is_memory() {
            // journal_mode answers with the mode now in effect
            let _mode: String = conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
                .map_err(connect_err)?;
        }
        Ok(conn)
    }
}

/// Fluent builder for `DbOptions`.
#[derive(Debug, Clone)]
pub struct DbOptionsBuilder {
    opts: DbOptions,
}

impl DbOptionsBuilder {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            opts: DbOptions::new(database),
        }
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.opts.read_only = read_only;
        self
    }

    #[must_use]
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.opts.create_if_missing = create;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn foreign_keys(mut self, enforce: bool) -> Self {
        self.opts.foreign_keys = enforce;
        self
    }

    #[must_use]
    pub fn finish(self) -> DbOptions {
        self.opts
    }

    /// Open a `Db` with these options.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` if the database cannot be opened.
    pub fn open(self) -> Result<Db, DbError> {
        Db::open_with(self.finish())
    }
}
