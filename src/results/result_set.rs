use std::sync::Arc;

use crate::types::RowValues;

use super::row::{ColumnIndex, DbRow};

/// Rows returned by a query, sharing one column index.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub results: Vec<DbRow>,
    columns: Arc<ColumnIndex>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(column_names: Vec<String>, capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            columns: Arc::new(ColumnIndex::new(column_names)),
        }
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        self.columns.names()
    }

    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        self.results
            .push(DbRow::new(Arc::clone(&self.columns), row_values));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&DbRow> {
        self.results.first()
    }

    #[must_use]
    pub fn into_first(self) -> Option<DbRow> {
        self.results.into_iter().next()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DbRow> {
        self.results.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = DbRow;
    type IntoIter = std::vec::IntoIter<DbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a DbRow;
    type IntoIter = std::slice::Iter<'a, DbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
