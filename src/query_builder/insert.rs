use crate::column_values::ColumnValues;
use crate::error::DbError;
use crate::ident::{check_column, check_table};

use super::{QueryAndParams, placeholders};

fn column_list(values: &ColumnValues) -> Result<String, DbError> {
    for column in values.columns() {
        check_column(column)?;
    }
    Ok(values.columns().collect::<Vec<_>>().join(","))
}

/// `insert into <table> (<cols>) values (?,…)` for a single row.
///
/// ```rust
/// use storefront_db::prelude::*;
/// use storefront_db::query_builder;
///
/// let vendor = ColumnValues::new().with("email", "a@x.com").with("password", "p");
/// let q = query_builder::insert("vendors", &vendor)?;
/// assert_eq!(q.query, "insert into vendors (email,password) values (?,?)");
/// assert_eq!(q.params, vec![RowValues::from("a@x.com"), RowValues::from("p")]);
/// # Ok::<(), DbError>(())
/// ```
///
/// # Errors
/// Returns `DbError::InvalidInput` for an empty mapping or an invalid table/column name.
pub fn insert(table: &str, values: &ColumnValues) -> Result<QueryAndParams, DbError> {
    check_table(table)?;
    if values.is_empty() {
        return Err(DbError::InvalidInput(format!(
            "insert into {table}: no columns supplied"
        )));
    }
    let query = format!(
        "insert into {table} ({}) values ({})",
        column_list(values)?,
        placeholders(values.len())
    );
    Ok(QueryAndParams::new(query, values.values().cloned().collect()))
}

/// Multi-row insert. Columns come from the first row; each row contributes one
/// `(?,…)` group and its values, row-major.
///
/// Later rows are trusted to carry the same columns in the same order as the first;
/// only their length is checked.
///
/// # Errors
/// Returns `DbError::InvalidInput` if `rows` is empty, the first row is empty, a later
/// row has a different column count, or a name is invalid.
pub fn insert_multiple(table: &str, rows: &[ColumnValues]) -> Result<QueryAndParams, DbError> {
    check_table(table)?;
    let Some(first) = rows.first() else {
        return Err(DbError::InvalidInput(format!(
            "insert into {table}: no rows supplied"
        )));
    };
    if first.is_empty() {
        return Err(DbError::InvalidInput(format!(
            "insert into {table}: first row has no columns"
        )));
    }
    let width = first.len();
    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(DbError::InvalidInput(format!(
            "insert into {table}: row {idx} has {} columns, expected {width}",
            row.len()
        )));
    }

    let group = format!("({})", placeholders(width));
    let groups = vec![group.as_str(); rows.len()].join(",");
    let query = format!(
        "insert into {table} ({}) values {groups}",
        column_list(first)?
    );
    let params = rows
        .iter()
        .flat_map(|row| row.values().cloned())
        .collect();
    Ok(QueryAndParams::new(query, params))
}
