//! Convenient imports for common functionality.

pub use crate::column_values::ColumnValues;
pub use crate::db::Db;
pub use crate::error::DbError;
pub use crate::query_builder::QueryAndParams;
pub use crate::results::{DbRow, ResultSet};
pub use crate::sqlite::{DbOptions, DbOptionsBuilder};
pub use crate::types::{ParamTypes, RowValues, TypeTag};
