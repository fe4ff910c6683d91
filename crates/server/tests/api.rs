use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_router() -> (Router, Arc<engine::Engine>) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Arc::new(
        engine::Engine::builder()
            .database(db)
            .build()
            .await
            .unwrap(),
    );
    let router = server::router(server::ServerState {
        engine: engine.clone(),
    });
    (router, engine)
}

fn receipt_payload() -> Value {
    json!({
        "business_name": "Tindahan ni Aling Nena",
        "contact_number": "0917 555 0123",
        "location": "Quezon City",
        "attendant": "Nena",
        "money_received": "200",
        "items": [
            {"description": "Coffee", "quantity": "2", "price": "50.00"},
            {"description": "Cake", "quantity": "1", "price": "30.00"}
        ]
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_fetch_and_delete_receipt() {
    let (router, _engine) = test_router().await;

    let response = router
        .clone()
        .oneshot(post_json("/receipts", &receipt_payload()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["total_amount_cents"], 13_000);
    assert_eq!(body["change_amount_cents"], 7_000);
    let number = body["receipt_number"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(get(&format!("/receipts/{number}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/receipts/{number}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(get(&format!("/receipts/{number}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_item_quantity_is_422() {
    let (router, _engine) = test_router().await;

    let mut payload = receipt_payload();
    payload["items"][0]["quantity"] = json!("two");
    let response = router.oneshot(post_json("/receipts", &payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_business_field_is_422() {
    let (router, _engine) = test_router().await;

    let mut payload = receipt_payload();
    payload["attendant"] = json!("");
    let response = router.oneshot(post_json("/receipts", &payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_requires_complete_range() {
    let (router, _engine) = test_router().await;

    let response = router
        .clone()
        .oneshot(get("/receipts?start=2026-08-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(get("/receipts?start=2026-08-01&end=2026-08-31"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_routes_reject_missing_or_bad_token() {
    let (router, _engine) = test_router().await;

    let response = router.clone().oneshot(get("/admin/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/admin/summary")
                .header(header::AUTHORIZATION, "Bearer not-a-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_grants_access_to_admin_routes() {
    let (router, engine) = test_router().await;
    engine.create_admin("nena", "masarap-ang-adobo").await.unwrap();

    let response = router
        .clone()
        .oneshot(post_json(
            "/admin/login",
            &json!({"username": "nena", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .clone()
        .oneshot(post_json(
            "/admin/login",
            &json!({"username": "nena", "password": "masarap-ang-adobo"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = json_body(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    router
        .clone()
        .oneshot(post_json("/receipts", &receipt_payload()))
        .await
        .unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/summary")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["today_cents"], 13_000);
    assert_eq!(body["total_receipts"], 1);

    // Logout invalidates the token.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/logout")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/admin/summary")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn daily_item_report_carries_the_days_receipts() {
    let (router, engine) = test_router().await;
    engine.create_admin("nena", "masarap-ang-adobo").await.unwrap();
    let token = engine.login("nena", "masarap-ang-adobo").await.unwrap();

    router
        .clone()
        .oneshot(post_json("/receipts", &receipt_payload()))
        .await
        .unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/admin/report/items")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["receipt_count"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    let receipts = body["receipts"].as_array().unwrap();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0]["total_amount_cents"], 13_000);
}

#[tokio::test]
async fn daily_sales_defaults_to_the_trailing_thirty_days() {
    let (router, engine) = test_router().await;
    engine.create_admin("nena", "masarap-ang-adobo").await.unwrap();
    let token = engine.login("nena", "masarap-ang-adobo").await.unwrap();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/sales/daily")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 30);

    // Half a range is still an error.
    let response = router
        .oneshot(
            Request::builder()
                .uri("/admin/sales/daily?start=2026-08-01")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn business_profile_is_admin_gated() {
    let (router, engine) = test_router().await;
    engine.create_admin("nena", "masarap-ang-adobo").await.unwrap();
    let token = engine.login("nena", "masarap-ang-adobo").await.unwrap();

    let response = router.clone().oneshot(get("/business")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let profile = json!({
        "name": "Tindahan ni Aling Nena",
        "contact_number": "0917 555 0123",
        "location": "Quezon City",
        "attendant": "Nena"
    });
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/admin/business")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(profile.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router.oneshot(get("/business")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Tindahan ni Aling Nena");
}

#[tokio::test]
async fn export_is_csv_with_header_row() {
    let (router, _engine) = test_router().await;

    router
        .clone()
        .oneshot(post_json("/receipts", &receipt_payload()))
        .await
        .unwrap();

    let response = router.oneshot(get("/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Receipt #,Date,Business Name,Customer,Attendant,Items,Total Amount")
    );
    let row = lines.next().unwrap();
    assert!(row.contains("Coffee (2x); Cake (1x)"));
    assert!(row.contains("130.00"));
}
