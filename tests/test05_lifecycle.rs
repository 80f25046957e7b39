mod common;

use std::time::Duration;

use storefront_db::prelude::*;

#[test]
fn missing_file_without_create_is_a_connection_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("absent.db");
    let err = DbOptions::builder(path.to_string_lossy())
        .create_if_missing(false)
        .open()
        .unwrap_err();
    assert!(matches!(err, DbError::ConnectionError(_)), "{err:?}");
    assert!(!path.exists());
    Ok(())
}

#[test]
fn unopenable_path_is_a_connection_error() {
    let err = Db::open("/nonexistent-dir/for/sure/shop.db").unwrap_err();
    match err {
        DbError::ConnectionError(msg) => assert!(msg.contains("shop.db"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn read_only_handle_rejects_writes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("catalog.db").to_string_lossy().into_owned();
    {
        // rollback journal, so the read-only handle needs no -shm file
        let db = DbOptions::builder(path.as_str()).wal(false).open()?;
        db.execute_batch(common::SCHEMA)?;
        db.execute_batch(common::SEED)?;
    }

    let db = DbOptions::builder(path.as_str())
        .read_only(true)
        .busy_timeout(Duration::from_millis(250))
        .open()?;
    assert_eq!(db.count("select count(*) from products")?, 3);
    let err = db
        .update_query_where(
            "products",
            &ColumnValues::from([("stock", 1)]),
            &ColumnValues::from([("id", 1)]),
        )
        .unwrap_err();
    assert!(matches!(err, DbError::ExecuteError(_)), "{err:?}");
    db.close()?;
    Ok(())
}

#[test]
fn dropping_an_open_transaction_rolls_it_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("drop.db").to_string_lossy().into_owned();
    {
        let db = Db::open(path.as_str())?;
        db.execute_batch(common::SCHEMA)?;
    }

    fn handle_request(path: &str) -> Result<(), DbError> {
        let mut db = Db::open(path)?;
        db.begin_transaction()?;
        db.insert_query("orders", &ColumnValues::from([("customer", "abandoned")]))?;
        // early return with the transaction still open
        Err(DbError::InvalidInput("cart is empty".into()))
    }
    assert!(handle_request(&path).is_err());

    let db = Db::open(path.as_str())?;
    assert_eq!(db.count("select count(*) from orders")?, 0);
    Ok(())
}

#[test]
fn close_rolls_back_and_releases() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("close.db").to_string_lossy().into_owned();
    let mut db = Db::open(path.as_str())?;
    db.execute_batch(common::SCHEMA)?;
    db.begin_transaction()?;
    db.insert_query("orders", &ColumnValues::from([("customer", "closing")]))?;
    db.close()?;

    let db = Db::open_with(DbOptions::new(path))?;
    assert_eq!(db.count("select count(*) from orders")?, 0);
    Ok(())
}

#[test]
fn options_load_from_json_config() -> Result<(), Box<dyn std::error::Error>> {
    let opts: DbOptions = serde_json::from_str(r#"{"database": ":memory:", "foreign_keys": false}"#)?;
    let db = Db::open_with(opts)?;
    db.execute_batch(common::SCHEMA)?;
    // with enforcement off an orphan product is accepted
    db.insert_query(
        "products",
        &ColumnValues::new()
            .with("vendor_id", 77)
            .with("name", "Orphan")
            .with("price", 1.0),
    )?;
    assert_eq!(db.database(), ":memory:");
    Ok(())
}

#[test]
fn foreign_key_enforcement_follows_options() -> Result<(), Box<dyn std::error::Error>> {
    let off = DbOptions::builder(":memory:").foreign_keys(false).open()?;
    assert_eq!(off.fetch_scalar("PRAGMA foreign_keys")?, Some(RowValues::Int(0)));
    let on = DbOptions::builder(":memory:").foreign_keys(true).open()?;
    assert_eq!(on.fetch_scalar("PRAGMA foreign_keys")?, Some(RowValues::Int(1)));
    Ok(())
}
