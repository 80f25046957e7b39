//! Parameterized SQL command builder and executor for the storefront database.
//!
//! Pages and request handlers open one [`Db`] per request and use it to:
//! - run caller-written SQL through raw reads ([`Db::fetch_all`], [`Db::fetch_one`],
//!   [`Db::fetch_scalar`], [`Db::count`], [`Db::execute`]) or the prepared path
//!   ([`Db::prepared_query`], [`Db::prepared_select`], [`Db::prepared_select_one`]);
//! - turn ordered [`ColumnValues`] into parameterized inserts and updates
//!   ([`Db::insert_query`], [`Db::insert_query_multiple`], [`Db::update_query_where`]);
//! - group work in transactions ([`Db::transaction`]).
//!
//! ```rust
//! use storefront_db::prelude::*;
//!
//! let db = Db::open(":memory:")?;
//! db.execute_batch("create table vendors (id integer primary key, email text, password text)")?;
//!
//! let vendor = ColumnValues::new().with("email", "a@x.com").with("password", "p");
//! let id = db.insert_query("vendors", &vendor)?;
//!
//! let types: ParamTypes = "ss".parse()?;
//! let row = db
//!     .prepared_select_one(
//!         "SELECT * from vendors WHERE email=? AND password=?",
//!         &types,
//!         &["a@x.com".into(), "p".into()],
//!     )?
//!     .expect("vendor row");
//! assert_eq!(row.get("id"), Some(&RowValues::Int(id)));
//! # Ok::<(), DbError>(())
//! ```

pub mod column_values;
pub mod db;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod sqlite;
pub mod types;

pub use column_values::ColumnValues;
pub use db::Db;
pub use error::DbError;
pub use query_builder::QueryAndParams;
pub use results::{DbRow, ResultSet};
pub use sqlite::{DbOptions, DbOptionsBuilder};
pub use types::{ParamTypes, RowValues, TypeTag};
