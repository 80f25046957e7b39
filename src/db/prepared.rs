use rusqlite::{CachedStatement, Statement, params_from_iter};

use crate::error::DbError;
use crate::results::{DbRow, ResultSet};
use crate::sqlite::params::Params;
use crate::sqlite::query::build_result_set;
use crate::types::{ParamTypes, RowValues};

use super::Db;

/// Reject a bind whose parameter count differs from the statement's placeholders.
fn check_param_count(stmt: &Statement<'_>, sql: &str, params: &Params) -> Result<(), DbError> {
    let expected = stmt.parameter_count();
    if expected == params.len() {
        Ok(())
    } else {
        Err(DbError::ParameterError(format!(
            "statement expects {expected} parameters, {} supplied: {sql}",
            params.len()
        )))
    }
}

impl Db {
    fn prepare_bound(
        &self,
        sql: &str,
        types: &ParamTypes,
        params: &[RowValues],
    ) -> Result<(CachedStatement<'_>, Params), DbError> {
        let converted = Params::convert(types, params)?;
        tracing::debug!(sql, params = converted.len(), types = %types, "prepared statement");
        let stmt = self
            .conn()?
            .prepare_cached(sql)
            .map_err(|e| DbError::prepare(&e))?;
        check_param_count(&stmt, sql, &converted)?;
        Ok((stmt, converted))
    }

    /// Prepare `sql`, bind `params` positionally and execute it, returning rows changed.
    ///
    /// An empty `params` slice binds nothing.
    ///
    /// # Errors
    /// Returns `DbError::PrepareError` if the statement is rejected,
    /// `DbError::ParameterError` if the parameters do not fit the placeholders or the
    /// type tags, and `DbError::ExecuteError` if execution fails.
    pub fn prepared_query(
        &self,
        sql: &str,
        types: &ParamTypes,
        params: &[RowValues],
    ) -> Result<usize, DbError> {
        let (mut stmt, converted) = self.prepare_bound(sql, types, params)?;
        stmt.execute(params_from_iter(converted.as_values().iter()))
            .map_err(|e| DbError::execute(&e))
    }

    /// Like [`Db::prepared_query`] but returns every result row.
    ///
    /// # Errors
    /// Same as [`Db::prepared_query`].
    pub fn prepared_select(
        &self,
        sql: &str,
        types: &ParamTypes,
        params: &[RowValues],
    ) -> Result<ResultSet, DbError> {
        let (mut stmt, converted) = self.prepare_bound(sql, types, params)?;
        build_result_set(&mut stmt, converted.as_values(), None)
    }

    /// The first result row, or `None` if the result is empty.
    ///
    /// # Errors
    /// Same as [`Db::prepared_query`].
    pub fn prepared_select_one(
        &self,
        sql: &str,
        types: &ParamTypes,
        params: &[RowValues],
    ) -> Result<Option<DbRow>, DbError> {
        let (mut stmt, converted) = self.prepare_bound(sql, types, params)?;
        Ok(build_result_set(&mut stmt, converted.as_values(), Some(1))?.into_first())
    }
}
