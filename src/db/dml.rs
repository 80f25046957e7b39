use crate::column_values::ColumnValues;
use crate::error::DbError;
use crate::query_builder::{self, QueryAndParams};
use crate::types::{ParamTypes, RowValues};

use super::Db;

impl Db {
    /// Execute a generated statement through the prepared path with native binding.
    ///
    /// # Errors
    /// Returns `DbError::ParameterError` if the placeholder and parameter counts
    /// disagree, otherwise the errors of [`Db::prepared_query`].
    pub fn execute_generated(&self, statement: &QueryAndParams) -> Result<usize, DbError> {
        statement.check()?;
        self.prepared_query(&statement.query, &ParamTypes::native(), &statement.params)
    }

    /// Insert one row and return its generated id.
    ///
    /// The id is read back with a follow-up `select last_insert_rowid()` on the same
    /// connection.
    ///
    /// # Errors
    /// Returns `DbError::InvalidInput` for an empty mapping or invalid names, and the
    /// prepared-path errors otherwise.
    pub fn insert_query(&self, table: &str, values: &ColumnValues) -> Result<i64, DbError> {
        let statement = query_builder::insert(table, values)?;
        self.execute_generated(&statement)?;
        match self.fetch_scalar("select last_insert_rowid()")? {
            Some(RowValues::Int(id)) => Ok(id),
            other => Err(DbError::ExecuteError(format!(
                "insert into {table}: last_insert_rowid() returned {other:?}"
            ))),
        }
    }

    /// Insert all `rows` in one multi-row statement, returning rows inserted.
    ///
    /// # Errors
    /// Returns `DbError::InvalidInput` if `rows` is empty or ragged, and the
    /// prepared-path errors otherwise.
    pub fn insert_query_multiple(
        &self,
        table: &str,
        rows: &[ColumnValues],
    ) -> Result<usize, DbError> {
        let statement = query_builder::insert_multiple(table, rows)?;
        self.execute_generated(&statement)
    }

    /// Update using the last entry of `values` as the key. See
    /// [`query_builder::update_last_key`] for why [`Db::update_query_where`] is safer.
    ///
    /// # Errors
    /// Returns `DbError::InvalidInput` for fewer than two entries, and the prepared-path
    /// errors otherwise.
    pub fn update_query(&self, table: &str, values: &ColumnValues) -> Result<usize, DbError> {
        let statement = query_builder::update_last_key(table, values)?;
        self.execute_generated(&statement)
    }

    /// Update `values` on the rows matching every entry of `where_values`.
    ///
    /// # Errors
    /// Returns `DbError::InvalidInput` if `where_values` (or `values`) is empty, and the
    /// prepared-path errors otherwise.
    pub fn update_query_where(
        &self,
        table: &str,
        values: &ColumnValues,
        where_values: &ColumnValues,
    ) -> Result<usize, DbError> {
        let statement = query_builder::update_where(table, values, where_values)?;
        self.execute_generated(&statement)
    }
}
