use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::column_values::ColumnValues;
use crate::types::RowValues;

/// Column names of a result set plus a name to position lookup, shared by every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        // first occurrence wins for duplicate names (e.g. joins selecting two `id`s)
        for (i, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(i);
        }
        Self { names, positions }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One result row, addressable by column name or position.
#[derive(Debug, Clone)]
pub struct DbRow {
    columns: Arc<ColumnIndex>,
    values: Vec<RowValues>,
}

impl DbRow {
    #[must_use]
    pub fn new(columns: Arc<ColumnIndex>, values: Vec<RowValues>) -> Self {
        Self { columns, values }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        self.columns.names()
    }

    /// Value of `column_name`, or `None` if the result has no such column.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.columns
            .position(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<RowValues> {
        self.values
    }

    /// The row as an ordered column-value mapping, in select-list order.
    #[must_use]
    pub fn to_column_values(&self) -> ColumnValues {
        self.columns
            .names()
            .iter()
            .zip(&self.values)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// JSON object view used by the CLI. Blobs become arrays of bytes.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut obj = Map::with_capacity(self.values.len());
        for (name, value) in self.columns.names().iter().zip(&self.values) {
            let json = match value {
                RowValues::Int(i) => JsonValue::from(*i),
                RowValues::Float(f) => JsonValue::from(*f),
                RowValues::Text(s) => JsonValue::from(s.as_str()),
                RowValues::Bool(b) => JsonValue::from(*b),
                RowValues::Timestamp(dt) => JsonValue::from(dt.format("%F %T%.f").to_string()),
                RowValues::Null => JsonValue::Null,
                RowValues::JSON(v) => v.clone(),
                RowValues::Blob(bytes) => JsonValue::from(bytes.clone()),
            };
            obj.insert(name.clone(), json);
        }
        JsonValue::Object(obj)
    }
}
