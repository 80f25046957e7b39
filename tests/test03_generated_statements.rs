mod common;

use storefront_db::prelude::*;
use storefront_db::query_builder;

#[test]
fn vendor_signup_then_login() -> Result<(), Box<dyn std::error::Error>> {
    let db = Db::open(":memory:")?;
    db.execute_batch(common::SCHEMA)?;

    let vendor = ColumnValues::new()
        .with("email", "a@x.com")
        .with("password", "p");
    let generated = query_builder::insert("vendors", &vendor)?;
    assert_eq!(
        generated.query,
        "insert into vendors (email,password) values (?,?)"
    );
    assert_eq!(
        generated.params,
        vec![RowValues::from("a@x.com"), RowValues::from("p")]
    );

    let id = db.insert_query("vendors", &vendor)?;
    assert_eq!(id, 1);
    assert_eq!(db.last_insert_id()?, id);

    let row = db
        .prepared_select_one(
            "SELECT * from vendors WHERE email=? AND password=?",
            &"ss".parse()?,
            &["a@x.com".into(), "p".into()],
        )?
        .expect("vendor row");
    assert_eq!(row.get("id"), Some(&RowValues::Int(id)));
    assert_eq!(row.get("email").and_then(RowValues::as_text), Some("a@x.com"));
    assert_eq!(row.get("password").and_then(RowValues::as_text), Some("p"));
    Ok(())
}

#[test]
fn insert_round_trips_through_prepared_select() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let product = ColumnValues::new()
        .with("vendor_id", 1)
        .with("name", "Durian")
        .with("price", 7.75)
        .with("stock", 12);
    let id = db.insert_query("products", &product)?;
    assert_eq!(id, 4);

    let row = db
        .prepared_select_one(
            "select vendor_id, name, price, stock from products where id = ?",
            &ParamTypes::native(),
            &[RowValues::Int(id)],
        )?
        .expect("inserted product");
    assert_eq!(row.to_column_values(), product);
    Ok(())
}

#[test]
fn batch_insert_writes_every_row() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let order_id = db.insert_query("orders", &ColumnValues::from([("customer", "c-17")]))?;

    let items: Vec<ColumnValues> = [(1, 2), (2, 1), (3, 10)]
        .into_iter()
        .map(|(product_id, qty)| {
            ColumnValues::new()
                .with("order_id", order_id)
                .with("product_id", product_id)
                .with("qty", qty)
        })
        .collect();
    assert_eq!(db.insert_query_multiple("order_items", &items)?, 3);

    let rs = db.prepared_select(
        "select product_id, qty from order_items where order_id = ? order by product_id",
        &ParamTypes::native(),
        &[RowValues::Int(order_id)],
    )?;
    let got: Vec<(i64, i64)> = rs
        .iter()
        .map(|r| {
            (
                *r.get("product_id").unwrap().as_int().unwrap(),
                *r.get("qty").unwrap().as_int().unwrap(),
            )
        })
        .collect();
    assert_eq!(got, vec![(1, 2), (2, 1), (3, 10)]);
    Ok(())
}

#[test]
fn empty_batch_never_reaches_the_database() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let err = db.insert_query_multiple("order_items", &[]).unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)), "{err:?}");
    Ok(())
}

#[test]
fn update_where_scopes_to_matching_rows() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let set = ColumnValues::new().with("stock", 5).with("price", 3.0);
    let cond = ColumnValues::new().with("vendor_id", 1).with("name", "Papaya");
    assert_eq!(db.update_query_where("products", &set, &cond)?, 1);

    let row = db
        .fetch_one("select stock, price from products where name = 'Papaya'")?
        .expect("papaya");
    assert_eq!(row, vec![RowValues::Int(5), RowValues::Float(3.0)]);
    assert_eq!(db.count("select stock from products where name = 'Mango'")?, 40);
    Ok(())
}

#[test]
fn update_without_where_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let set = ColumnValues::new().with("stock", 0);
    let err = db
        .update_query_where("products", &set, &ColumnValues::new())
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)), "{err:?}");
    assert_eq!(db.count("select count(*) from products where stock = 0")?, 1);
    Ok(())
}

#[test]
fn update_query_keys_on_last_entry() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let values = ColumnValues::new()
        .with("name", "Green Mango")
        .with("stock", 41)
        .with("id", 1);
    assert_eq!(db.update_query("products", &values)?, 1);
    assert_eq!(
        db.fetch_scalar("select name from products where id = 1")?,
        Some(RowValues::Text("Green Mango".into()))
    );

    // reversed order makes `stock` the key: no product has stock 1
    let reversed = ColumnValues::new()
        .with("id", 1)
        .with("name", "ignored")
        .with("stock", 1);
    assert_eq!(db.update_query("products", &reversed)?, 0);
    Ok(())
}

#[test]
fn invalid_identifiers_are_rejected_before_execution() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let values = ColumnValues::new().with("email", "x@x.com");
    let err = db
        .insert_query("vendors; drop table vendors", &values)
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidInput(_)));
    assert_eq!(db.count("select count(*) from vendors")?, 1);
    Ok(())
}

#[test]
fn generated_statement_errors_carry_driver_text() -> Result<(), Box<dyn std::error::Error>> {
    let db = common::seeded_db()?;
    let values = ColumnValues::new().with("colour", "red");
    match db.insert_query("products", &values).unwrap_err() {
        DbError::PrepareError(msg) => assert!(msg.contains("colour"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
    Ok(())
}
