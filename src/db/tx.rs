use crate::error::DbError;

use super::Db;

impl Db {
    fn run_control(&self, sql: &str) -> Result<(), DbError> {
        tracing::debug!(sql, "transaction control");
        self.conn()?
            .execute_batch(sql)
            .map_err(|e| DbError::execute(&e))
    }

    /// Start a transaction; statements stay invisible to other connections until
    /// [`Db::commit_transaction`].
    ///
    /// # Errors
    /// Returns `DbError::InvalidState` if a transaction is already open on the
    /// connection (no nesting), including one started with a raw `BEGIN`.
    pub fn begin_transaction(&mut self) -> Result<(), DbError> {
        if self.in_transaction() {
            self.began_transaction = true;
            return Err(DbError::InvalidState(
                "transaction already in progress".into(),
            ));
        }
        self.run_control("BEGIN")?;
        self.began_transaction = true;
        Ok(())
    }

    /// # Errors
    /// Returns `DbError::InvalidState` if no transaction is open, including one the
    /// database already rolled back on its own, or `DbError::ExecuteError` if the
    /// commit fails (the transaction stays open).
    pub fn commit_transaction(&mut self) -> Result<(), DbError> {
        if !self.in_transaction() {
            let msg = if std::mem::take(&mut self.began_transaction) {
                "transaction was already rolled back by the database"
            } else {
                "no transaction to commit"
            };
            return Err(DbError::InvalidState(msg.into()));
        }
        let result = self.run_control("COMMIT");
        self.began_transaction = self.in_transaction();
        result
    }

    /// Roll back the open transaction. A transaction the database already ended on
    /// its own (e.g. `insert or rollback`, `SQLITE_FULL`) counts as rolled back.
    ///
    /// # Errors
    /// Returns `DbError::InvalidState` if no transaction was begun, or
    /// `DbError::ExecuteError` if the rollback fails.
    pub fn rollback_transaction(&mut self) -> Result<(), DbError> {
        if !self.in_transaction() {
            if std::mem::take(&mut self.began_transaction) {
                tracing::debug!(database = %self.database, "transaction already rolled back");
                return Ok(());
            }
            return Err(DbError::InvalidState("no transaction to roll back".into()));
        }
        let result = self.run_control("ROLLBACK");
        self.began_transaction = self.in_transaction();
        result
    }

    /// Run `f` inside a transaction: commit when it returns `Ok`, roll back and hand
    /// back its error when it returns `Err`.
    ///
    /// ```rust
    /// use storefront_db::prelude::*;
    ///
    /// let mut db = Db::open(":memory:")?;
    /// db.execute_batch("create table carts (id integer primary key, customer text)")?;
    /// let id = db.transaction(|db| db.insert_query("carts", &ColumnValues::from([("customer", "c1")])))?;
    /// assert_eq!(db.count("select count(*) from carts")?, 1);
    /// assert_eq!(id, 1);
    /// # Ok::<(), DbError>(())
    /// ```
    ///
    /// # Errors
    /// Returns `DbError::InvalidState` if a transaction is already open, the error of
    /// `f`, or the commit error.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut Db) -> Result<T, DbError>,
    {
        self.begin_transaction()?;
        match f(self) {
            Ok(value) => match self.commit_transaction() {
                Ok(()) => Ok(value),
                Err(err) => {
                    self.release_transaction("failed commit");
                    Err(err)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "transaction body failed");
                self.release_transaction("failed transaction body");
                Err(err)
            }
        }
    }
}
