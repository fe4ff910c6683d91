use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, ItemInput, ReceiptInput};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn item(description: &str, quantity: &str, price: &str) -> ItemInput {
    ItemInput {
        description: description.to_string(),
        custom_description: String::new(),
        quantity: quantity.to_string(),
        price: price.to_string(),
    }
}

fn receipt_input(items: Vec<ItemInput>) -> ReceiptInput {
    ReceiptInput {
        business_name: "Tindahan ni Aling Nena".to_string(),
        business_email: "nena@example.com".to_string(),
        contact_number: "0917 555 0123".to_string(),
        location: "Quezon City".to_string(),
        attendant: "Nena".to_string(),
        customer_name: String::new(),
        customer_address: String::new(),
        money_received: String::new(),
        items,
    }
}

async fn count_items(db: &DatabaseConnection) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM receipt_items",
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

#[tokio::test]
async fn create_receipt_computes_totals_and_change() {
    let (engine, _db) = engine_with_db().await;

    let mut input = receipt_input(vec![item("Coffee", "2", "50.00"), item("Cake", "1", "30.00")]);
    input.money_received = "200".to_string();

    let receipt = engine.create_receipt(input).await.unwrap();
    assert_eq!(receipt.items.len(), 2);
    assert_eq!(receipt.total_amount.cents(), 13_000);
    assert_eq!(receipt.money_received.cents(), 20_000);
    assert_eq!(receipt.change_amount.cents(), 7_000);

    let fetched = engine
        .receipt_by_number(&receipt.receipt_number)
        .await
        .unwrap();
    assert_eq!(fetched.total_amount.cents(), 13_000);
    assert_eq!(fetched.items.len(), 2);
}

#[tokio::test]
async fn blank_item_rows_are_skipped_silently() {
    let (engine, _db) = engine_with_db().await;

    let input = receipt_input(vec![item("Coffee", "2", "50.00"), item("Cake", "", "30.00")]);
    let receipt = engine.create_receipt(input).await.unwrap();

    assert_eq!(receipt.items.len(), 1);
    assert_eq!(receipt.items[0].description, "Coffee");
    assert_eq!(receipt.total_amount.cents(), 10_000);
}

#[tokio::test]
async fn unparseable_quantity_aborts_without_partial_write() {
    let (engine, db) = engine_with_db().await;

    let input = receipt_input(vec![item("Coffee", "2", "50.00"), item("Cake", "one", "30.00")]);
    let err = engine.create_receipt(input).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    assert!(engine.list_receipts(None).await.unwrap().is_empty());
    assert_eq!(count_items(&db).await, 0);
}

#[tokio::test]
async fn unparseable_price_aborts_without_partial_write() {
    let (engine, _db) = engine_with_db().await;

    let input = receipt_input(vec![item("Coffee", "2", "cheap")]);
    let err = engine.create_receipt(input).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(engine.list_receipts(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_required_business_field_writes_nothing() {
    let (engine, _db) = engine_with_db().await;

    let mut input = receipt_input(vec![item("Coffee", "2", "50.00")]);
    input.attendant = "   ".to_string();

    let err = engine.create_receipt(input).await.unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(engine.list_receipts(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn custom_sentinel_uses_free_text_description() {
    let (engine, _db) = engine_with_db().await;

    let mut custom = item("custom", "1", "75.00");
    custom.custom_description = "Halo-halo special".to_string();
    let receipt = engine.create_receipt(receipt_input(vec![custom])).await.unwrap();

    assert_eq!(receipt.items[0].description, "Halo-halo special");
}

#[tokio::test]
async fn blank_money_received_defaults_to_zero() {
    let (engine, _db) = engine_with_db().await;

    let receipt = engine
        .create_receipt(receipt_input(vec![item("Coffee", "2", "50.00")]))
        .await
        .unwrap();

    assert_eq!(receipt.money_received.cents(), 0);
    assert_eq!(receipt.change_amount.cents(), -10_000);
}

#[tokio::test]
async fn garbage_money_received_defaults_to_zero() {
    let (engine, _db) = engine_with_db().await;

    let mut input = receipt_input(vec![item("Coffee", "1", "50.00")]);
    input.money_received = "lots".to_string();
    let receipt = engine.create_receipt(input).await.unwrap();

    assert_eq!(receipt.money_received.cents(), 0);
    assert_eq!(receipt.change_amount.cents(), -5_000);
}

#[tokio::test]
async fn overflowing_subtotal_is_rejected_without_partial_write() {
    let (engine, db) = engine_with_db().await;

    let input = receipt_input(vec![item("Coffee", "9223372036854775", "100.00")]);
    let err = engine.create_receipt(input).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    assert!(engine.list_receipts(None).await.unwrap().is_empty());
    assert_eq!(count_items(&db).await, 0);
}

#[tokio::test]
async fn receipt_numbers_are_unique_within_one_second() {
    let (engine, _db) = engine_with_db().await;

    let first = engine
        .create_receipt(receipt_input(vec![item("Coffee", "1", "50.00")]))
        .await
        .unwrap();
    let second = engine
        .create_receipt(receipt_input(vec![item("Coffee", "1", "50.00")]))
        .await
        .unwrap();

    assert_ne!(first.receipt_number, second.receipt_number);
}

#[tokio::test]
async fn delete_receipt_removes_all_items() {
    let (engine, db) = engine_with_db().await;

    let receipt = engine
        .create_receipt(receipt_input(vec![
            item("Coffee", "2", "50.00"),
            item("Cake", "1", "30.00"),
        ]))
        .await
        .unwrap();
    assert_eq!(count_items(&db).await, 2);

    engine.delete_receipt(&receipt.receipt_number).await.unwrap();

    assert_eq!(count_items(&db).await, 0);
    let err = engine
        .receipt_by_number(&receipt.receipt_number)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_unknown_receipt_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.delete_receipt("20260101000000-ABCD").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("20260101000000-ABCD".to_string())
    );
}

#[tokio::test]
async fn list_receipts_filters_by_local_date_range() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_receipt(receipt_input(vec![item("Coffee", "1", "50.00")]))
        .await
        .unwrap();

    let today = engine::clock::today();
    let in_range = engine
        .list_receipts(Some((today, today)))
        .await
        .unwrap();
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].items.len(), 1);

    let past = today - chrono::Days::new(10);
    let out_of_range = engine
        .list_receipts(Some((past, past)))
        .await
        .unwrap();
    assert!(out_of_range.is_empty());

    let err = engine
        .list_receipts(Some((today, past)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}
