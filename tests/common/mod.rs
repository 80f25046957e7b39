#![allow(dead_code)]

use storefront_db::prelude::*;

pub const SCHEMA: &str = include_str!("../sqlite/storefront/schema.sql");
pub const SEED: &str = include_str!("../sqlite/storefront/seed.sql");

/// In-memory database with the storefront schema and seed rows.
pub fn seeded_db() -> Result<Db, DbError> {
    let db = Db::open(":memory:")?;
    db.execute_batch(SCHEMA)?;
    db.execute_batch(SEED)?;
    Ok(db)
}
