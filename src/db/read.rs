use crate::error::DbError;
use crate::results::ResultSet;
use crate::sqlite::query::build_result_set;
use crate::types::RowValues;

use super::Db;

/// Step and row-extraction failures on the raw path are all `QueryError`.
fn into_query_error(err: DbError) -> DbError {
    match err {
        DbError::ExecuteError(msg) => DbError::QueryError(msg),
        DbError::Sqlite(e) => DbError::query(&e),
        other => other,
    }
}

impl Db {
    fn raw_select(&self, sql: &str, limit: Option<usize>) -> Result<ResultSet, DbError> {
        tracing::debug!(sql, "raw select");
        let mut stmt = self.conn()?.prepare(sql).map_err(|e| DbError::query(&e))?;
        build_result_set(&mut stmt, &[], limit).map_err(into_query_error)
    }

    /// Every row of `sql` as named rows. An empty result is `Ok` with no rows.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` if the statement fails.
    pub fn fetch_all(&self, sql: &str) -> Result<ResultSet, DbError> {
        self.raw_select(sql, None)
    }

    /// The first row of `sql` as positional values, or `None` when there are no rows.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` if the statement fails.
    pub fn fetch_one(&self, sql: &str) -> Result<Option<Vec<RowValues>>, DbError> {
        Ok(self
            .raw_select(sql, Some(1))?
            .into_first()
            .map(crate::results::DbRow::into_values))
    }

    /// Column 0 of row 0, or `None` when there are no rows.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` if the statement fails.
    pub fn fetch_scalar(&self, sql: &str) -> Result<Option<RowValues>, DbError> {
        Ok(self
            .fetch_one(sql)?
            .and_then(|row| row.into_iter().next()))
    }

    /// Column 0 of row 0 as an integer; `0` when there are no rows.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` if the statement fails or the value is not numeric.
    pub fn count(&self, sql: &str) -> Result<i64, DbError> {
        match self.fetch_scalar(sql)? {
            None => Ok(0),
            Some(value) => value.to_count().ok_or_else(|| {
                DbError::QueryError(format!("count returned a non-numeric value: {value:?}"))
            }),
        }
    }

    /// Run one non-parameterized statement and return the number of rows changed.
    ///
    /// # Errors
    /// Returns `DbError::QueryError` carrying the driver message.
    pub fn execute(&self, sql: &str) -> Result<usize, DbError> {
        tracing::debug!(sql, "raw execute");
        self.conn()?.execute(sql, []).map_err(|e| DbError::query(&e))
    }

    /// Run a multi-statement script (schema setup, seed data).
    ///
    /// # Errors
    /// Returns `DbError::QueryError` carrying the driver message.
    pub fn execute_batch(&self, sql: &str) -> Result<(), DbError> {
        tracing::debug!(sql, "raw batch");
        self.conn()?.execute_batch(sql).map_err(|e| DbError::query(&e))
    }
}
