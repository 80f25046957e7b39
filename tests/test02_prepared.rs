mod common;

use storefront_db::prelude::*;

#[test]
fn prepared_select_binds_positionally() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let rs = db.prepared_select(
        "select name from products where vendor_id = ? and stock >= ? order by name",
        &ParamTypes::native(),
        &[RowValues::Int(1), RowValues::Int(1)],
    )?;
    let names: Vec<&str> = rs.iter().filter_map(|r| r.get("name")?.as_text()).collect();
    assert_eq!(names, ["Calamansi", "Mango"]);
    Ok(())
}

#[test]
fn string_tags_match_numeric_columns() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    // INTEGER affinity converts the bound text back to an integer for comparison
    let types: ParamTypes = "s".parse()?;
    let row = db
        .prepared_select_one("select name from products where id = ?", &types, &[2.into()])?
        .expect("product 2");
    assert_eq!(row.get("name").and_then(RowValues::as_text), Some("Papaya"));
    Ok(())
}

#[test]
fn prepared_select_one_on_empty_result() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let row = db.prepared_select_one(
        "select * from vendors where email = ?",
        &ParamTypes::native(),
        &["nobody@x.com".into()],
    )?;
    assert!(row.is_none());
    Ok(())
}

#[test]
fn prepared_query_returns_rows_changed() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let changed = db.prepared_query(
        "update products set stock = 0 where price < ?",
        &"d".parse()?,
        &["2".into()],
    )?;
    assert_eq!(changed, 2);
    assert_eq!(db.count("select count(*) from products where stock = 0")?, 3);
    Ok(())
}

#[test]
fn no_params_binds_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let rs = db.prepared_select("select count(*) as n from products", &ParamTypes::native(), &[])?;
    assert_eq!(rs.first().and_then(|r| r.get("n")), Some(&RowValues::Int(3)));
    Ok(())
}

#[test]
fn malformed_sql_is_a_prepare_error() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let err = db
        .prepared_select("select * from missing where id = ?", &ParamTypes::native(), &[1.into()])
        .unwrap_err();
    match err {
        DbError::PrepareError(msg) => assert!(msg.contains("missing"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }

    let err = db
        .prepared_query("update products set nope = ?", &ParamTypes::native(), &[1.into()])
        .unwrap_err();
    assert!(matches!(err, DbError::PrepareError(_)), "{err:?}");
    Ok(())
}

#[test]
fn constraint_violation_is_an_execute_error() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let err = db
        .prepared_query(
            "insert into vendors (email, password) values (?, ?)",
            &"ss".parse()?,
            &["seed@x.com".into(), "again".into()],
        )
        .unwrap_err();
    assert!(matches!(err, DbError::ExecuteError(_)), "{err:?}");

    let err = db
        .prepared_query(
            "insert into products (vendor_id, name, price) values (?, ?, ?)",
            &ParamTypes::native(),
            &[RowValues::Int(42), "Orphan".into(), RowValues::Float(1.0)],
        )
        .unwrap_err();
    match err {
        DbError::ExecuteError(msg) => assert!(msg.contains("FOREIGN KEY"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
    Ok(())
}

#[test]
fn parameter_count_mismatch_fails_fast() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let too_few = db.prepared_query(
        "update products set stock = ? where id = ?",
        &ParamTypes::native(),
        &[RowValues::Int(1)],
    );
    assert!(matches!(too_few, Err(DbError::ParameterError(_))), "{too_few:?}");

    let too_many = db.prepared_select(
        "select * from products where id = ?",
        &ParamTypes::native(),
        &[RowValues::Int(1), RowValues::Int(2)],
    );
    assert!(matches!(too_many, Err(DbError::ParameterError(_))), "{too_many:?}");

    let tag_mismatch = db.prepared_select(
        "select * from products where id = ?",
        &"ss".parse()?,
        &[RowValues::Int(1)],
    );
    assert!(matches!(tag_mismatch, Err(DbError::ParameterError(_))));

    // nothing ran
    assert_eq!(db.count("select sum(stock) from products")?, 340);
    Ok(())
}
