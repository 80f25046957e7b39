// SQLite driver glue:
// - config: connection options, builder and open flags
// - params: binding `RowValues` as rusqlite values
// - query: reading rows back into `RowValues` / `ResultSet`

pub mod config;
pub mod params;
pub mod query;

pub use config::{DbOptions, DbOptionsBuilder};
pub use params::{Params, row_value_to_sqlite_value};
pub use query::{build_result_set, sqlite_extract_value};
