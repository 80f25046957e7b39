use rusqlite::types::Value;

use crate::error::DbError;
use crate::types::{ParamTypes, RowValues};

/// Convert a single `RowValues` to a rusqlite `Value`.
///
/// SQLite has no boolean, timestamp or JSON storage class: booleans bind as `0`/`1`,
/// timestamps as `YYYY-MM-DD HH:MM:SS[.fff]` text and JSON as its serialized text.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Bound parameter list for one statement execution.
#[derive(Debug, Clone, Default)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// Apply `types` to `params` and convert the result to SQLite values.
    ///
    /// # Errors
    /// Returns `DbError::ParameterError` if the type tags do not fit the parameters.
    pub fn convert(types: &ParamTypes, params: &[RowValues]) -> Result<Self, DbError> {
        let typed = types.apply(params)?;
        Ok(Params(typed.iter().map(row_value_to_sqlite_value).collect()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }
}
