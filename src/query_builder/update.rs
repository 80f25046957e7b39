use crate::column_values::ColumnValues;
use crate::error::DbError;
use crate::ident::{check_column, check_table};

use super::QueryAndParams;

fn assignments<'a, I>(columns: I, sep: &str) -> Result<String, DbError>
where
    I: Iterator<Item = &'a str>,
{
    let parts = columns
        .map(|c| check_column(c).map(|()| format!("{c} = ?")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(sep))
}

/// Update keyed on the LAST entry of `values`; every earlier entry becomes a SET
/// assignment.
///
/// Which column is the key depends entirely on insertion order, so
/// `{"name": .., "id": 5}` updates the row with id 5 while `{"id": 5, "name": ..}`
/// updates every row whose name matches. Prefer [`update_where`].
///
/// # Errors
/// Returns `DbError::InvalidInput` if `values` has fewer than two entries or a name is
/// invalid.
pub fn update_last_key(table: &str, values: &ColumnValues) -> Result<QueryAndParams, DbError> {
    check_table(table)?;
    if values.len() < 2 {
        return Err(DbError::InvalidInput(format!(
            "update {table}: need at least one column to set and a key column"
        )));
    }
    let set_count = values.len() - 1;
    let set = assignments(values.columns().take(set_count), ", ")?;
    let key = assignments(values.columns().skip(set_count), "")?;
    let query = format!("update {table} set {set} where {key}");
    Ok(QueryAndParams::new(query, values.values().cloned().collect()))
}

/// `update <table> set a = ?, … where k1 = ? and k2 = ?`, parameters SET first then
/// WHERE.
///
/// ```rust
/// use storefront_db::prelude::*;
/// use storefront_db::query_builder;
///
/// let set = ColumnValues::new().with("status", "shipped");
/// let key = ColumnValues::new().with("id", 41).with("vendor_id", 3);
/// let q = query_builder::update_where("orders", &set, &key)?;
/// assert_eq!(q.query, "update orders set status = ? where id = ? and vendor_id = ?");
/// assert_eq!(q.params.len(), 3);
/// # Ok::<(), DbError>(())
/// ```
///
/// # Errors
/// Returns `DbError::InvalidInput` if either mapping is empty or a name is invalid. An
/// update is never generated without a WHERE clause.
pub fn update_where(
    table: &str,
    values: &ColumnValues,
    where_values: &ColumnValues,
) -> Result<QueryAndParams, DbError> {
    check_table(table)?;
    if values.is_empty() {
        return Err(DbError::InvalidInput(format!(
            "update {table}: no columns to set"
        )));
    }
    if where_values.is_empty() {
        return Err(DbError::InvalidInput(format!(
            "update {table}: refusing to update without a where clause"
        )));
    }
    let set = assignments(values.columns(), ", ")?;
    let cond = assignments(where_values.columns(), " and ")?;
    let query = format!("update {table} set {set} where {cond}");
    let params = values
        .values()
        .chain(where_values.values())
        .cloned()
        .collect();
    Ok(QueryAndParams::new(query, params))
}
