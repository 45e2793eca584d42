//! HTTP tests for the master-data endpoints.

mod common;

use axum::http::{Method, StatusCode};
use rust_decimal_macros::dec;
use serde_json::json;

use common::{create, decimal, get, post, send, setup_app};

#[tokio::test]
async fn test_health_reports_database() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_vendor_crud() {
    let app = setup_app().await;
    let id = create(
        &app,
        "/api/v1/vendors",
        json!({
            "vendor_name": "Ravi",
            "company_name": "Ravi Traders",
            "mobile_number": "9000000001",
            "city": "Pune"
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/vendors/{id}"),
        Some(json!({
            "vendor_name": "Ravi K",
            "company_name": "Ravi Traders",
            "mobile_number": "9000000001",
            "city": "Mumbai"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Mumbai");

    let (status, body) = get(&app, "/api/v1/vendors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["vendor_name"], "Ravi K");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/vendors/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(&app, &format!("/api/v1/vendors/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = setup_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/customers",
        json!({
            "customer_name": "",
            "mobile_number": "9876543210",
            "city": "Pune"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (_, body) = get(&app, "/api/v1/customers").await;
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_product_defaults_and_price_rule() {
    let app = setup_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/products",
        json!({
            "product_name": "Pen",
            "category_name": "Stationery",
            "purchase_price": "5",
            "sell_price": "8"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity"], 0);
    assert_eq!(body["stock_alert"], 10);
    assert_eq!(body["low_stock"], true);

    let (status, body) = post(
        &app,
        "/api/v1/products",
        json!({
            "product_name": "Ink",
            "category_name": "Stationery",
            "purchase_price": "-1",
            "sell_price": "8"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_stock_alerts_boundary() {
    let app = setup_app().await;
    for (name, quantity) in [("At", 5), ("Above", 6), ("Below", 4)] {
        create(
            &app,
            "/api/v1/products",
            json!({
                "product_name": name,
                "category_name": "Misc",
                "purchase_price": "1",
                "sell_price": "2",
                "quantity": quantity,
                "stock_alert": 5
            }),
        )
        .await;
    }

    let (status, body) = get(&app, "/api/v1/products/stock-alerts").await;

    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["product_name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["At", "Below"]);
}

#[tokio::test]
async fn test_bank_account_is_not_in_ledger() {
    let app = setup_app().await;
    create(
        &app,
        "/api/v1/bank-accounts",
        json!({
            "account_name": "Main",
            "account_number": "001122",
            "bank_name": "State Bank",
            "ifsc_code": "SBIN0001",
            "opening_balance": "5000"
        }),
    )
    .await;

    let (_, totals) = get(&app, "/api/v1/ledger/totals").await;

    assert_eq!(decimal(&totals["balance"]), dec!(0));
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/api/v1/employees/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn test_malformed_query_is_rejected() {
    let app = setup_app().await;

    let (status, body) = get(&app, "/api/v1/vendors?page=first").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_product_price_beyond_column_is_rejected() {
    let app = setup_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/products",
        json!({
            "product_name": "Pen",
            "category_name": "Stationery",
            "purchase_price": "5",
            "sell_price": "10.005"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    let (_, list) = get(&app, "/api/v1/products").await;
    assert_eq!(list["meta"]["total"], 0);
}
