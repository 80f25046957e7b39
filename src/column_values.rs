use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::types::RowValues;

/// Ordered column name to value mapping.
///
/// Iteration order is insertion order and decides placeholder position in every
/// generated statement. Setting a column that is already present replaces its value
/// in place.
///
/// ```rust
/// use storefront_db::prelude::*;
///
/// let vendor = ColumnValues::new()
///     .with("email", "a@x.com")
///     .with("password", "p");
/// assert_eq!(vendor.columns().collect::<Vec<_>>(), ["email", "password"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnValues {
    inner: IndexMap<String, RowValues>,
}

impl ColumnValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: IndexMap::with_capacity(capacity),
        }
    }

    /// Builder-style `set`.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.set(column, value);
        self
    }

    /// Set `column`, returning the previous value if the column was already present.
    pub fn set(
        &mut self,
        column: impl Into<String>,
        value: impl Into<RowValues>,
    ) -> Option<RowValues> {
        self.inner.insert(column.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.inner.get(column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &RowValues> {
        self.inner.values()
    }

    pub fn iter(&self) -> Iter<'_, String, RowValues> {
        self.inner.iter()
    }

    /// The last entry in iteration order.
    #[must_use]
    pub fn last(&self) -> Option<(&str, &RowValues)> {
        self.inner.last().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a ColumnValues {
    type Item = (&'a String, &'a RowValues);
    type IntoIter = Iter<'a, String, RowValues>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ColumnValues
where
    K: Into<String>,
    V: Into<RowValues>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = ColumnValues::new();
        for (k, v) in iter {
            values.set(k, v);
        }
        values
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ColumnValues
where
    K: Into<String>,
    V: Into<RowValues>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
