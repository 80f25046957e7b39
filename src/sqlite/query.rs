use rusqlite::types::Value;
use rusqlite::{Statement, params_from_iter};

use crate::error::DbError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Extract column `idx` of a SQLite row as `RowValues`.
///
/// # Errors
/// Returns `DbError::Sqlite` if the column cannot be read.
pub fn sqlite_extract_value(row: &rusqlite::Row, idx: usize) -> Result<RowValues, DbError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(b) => RowValues::Blob(b),
    })
}

/// Run a prepared statement and collect every row.
///
/// `limit` stops stepping after that many rows, which lets single-row reads avoid
/// materializing the whole result.
///
/// # Errors
/// Returns `DbError::ExecuteError` if stepping the statement fails.
pub fn build_result_set(
    stmt: &mut Statement<'_>,
    params: &[Value],
    limit: Option<usize>,
) -> Result<ResultSet, DbError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();
    let mut result_set = ResultSet::with_capacity(column_names, limit.unwrap_or(10).min(64));

    let mut rows = stmt
        .query(params_from_iter(params.iter()))
        .map_err(|e| DbError::execute(&e))?;
    while !limit.is_some_and(|max| result_set.len() >= max) {
        let Some(row) = rows.next().map_err(|e| DbError::execute(&e))? else {
            break;
        };
        let row_values = (0..col_count)
            .map(|i| sqlite_extract_value(row, i))
            .collect::<Result<Vec<_>, _>>()?;
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
