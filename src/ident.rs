//! SQL identifier validation.
//!
//! Table and column names are interpolated into generated statement text, so they
//! are checked against `[A-Za-z_][A-Za-z0-9_$]*`. Table names may be qualified with
//! a schema (`main.vendors`); column names may not.

use crate::error::DbError;

fn is_plain_ident(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Validate a (possibly schema-qualified) table name.
///
/// # Errors
/// Returns `DbError::InvalidInput` if any dotted part is not a plain identifier.
pub fn check_table(name: &str) -> Result<(), DbError> {
    if !name.is_empty() && name.split('.').all(is_plain_ident) {
        Ok(())
    } else {
        Err(DbError::InvalidInput(format!("invalid table name '{name}'")))
    }
}

/// Validate a column name.
///
/// # Errors
/// Returns `DbError::InvalidInput` if `name` is not a plain identifier.
pub fn check_column(name: &str) -> Result<(), DbError> {
    if is_plain_ident(name) {
        Ok(())
    } else {
        Err(DbError::InvalidInput(format!("invalid column name '{name}'")))
    }
}
