//! HTTP tests for the income/expense ledger and the dashboard.

mod common;

use axum::http::{Method, StatusCode};
use rust_decimal_macros::dec;
use serde_json::json;

use common::{create, decimal, get, post, send, setup_app};

#[tokio::test]
async fn test_running_balance_worked_example() {
    let app = setup_app().await;
    post(&app, "/api/v1/income", json!({"name": "Sales", "amount": "1000", "payment_type": "Cash"})).await;
    post(&app, "/api/v1/expenses", json!({"name": "Rent", "amount": "400", "payment_type": "Cash"})).await;

    let (status, expense) = post(
        &app,
        "/api/v1/expenses",
        json!({"name": "Power", "amount": "100", "payment_type": "Online"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["kind"], "expense");
    assert_eq!(decimal(&expense["previous_balance"]), dec!(600));

    let (_, income) = post(
        &app,
        "/api/v1/income",
        json!({"name": "Repair", "amount": "50", "payment_type": "Cash"}),
    )
    .await;
    assert_eq!(decimal(&income["previous_balance"]), dec!(500));

    let (_, totals) = get(&app, "/api/v1/ledger/totals").await;
    assert_eq!(decimal(&totals["total_income"]), dec!(1050));
    assert_eq!(decimal(&totals["total_expense"]), dec!(500));
    assert_eq!(decimal(&totals["balance"]), dec!(550));

    let (_, dashboard) = get(&app, "/api/v1/dashboard").await;
    assert_eq!(decimal(&dashboard["net_balance"]), dec!(550));
}

#[tokio::test]
async fn test_client_previous_balance_is_ignored() {
    let app = setup_app().await;

    let (status, income) = post(
        &app,
        "/api/v1/income",
        json!({
            "name": "Sales",
            "amount": "100",
            "payment_type": "Cash",
            "previous_balance": "99999"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&income["previous_balance"]), dec!(0));
}

#[tokio::test]
async fn test_invalid_entries_are_rejected() {
    let app = setup_app().await;

    let (status, body) = post(&app, "/api/v1/income", json!({"name": "Sales", "payment_type": "Cash"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_field");

    let (status, body) = post(
        &app,
        "/api/v1/expenses",
        json!({"name": "Rent", "amount": "0", "payment_type": "Cash"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "non_positive_amount");

    let (status, body) = post(
        &app,
        "/api/v1/income",
        json!({
            "name": "Sales",
            "amount": "10",
            "payment_type": "Cash",
            "employee_id": uuid::Uuid::new_v4()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "employee_on_income");

    let (_, list) = get(&app, "/api/v1/income").await;
    assert_eq!(list["meta"]["total"], 0);
}

#[tokio::test]
async fn test_pay_salary() {
    let app = setup_app().await;
    let employee_id = create(
        &app,
        "/api/v1/employees",
        json!({"employee_name": "Meena", "mobile_number": "9000000002", "city": "Pune"}),
    )
    .await;

    let (status, body) = post(&app, "/api/v1/expenses/pay-salary", json!({"amount": "500"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_field");

    let (status, body) = post(
        &app,
        "/api/v1/expenses/pay-salary",
        json!({"employee_id": uuid::Uuid::new_v4(), "amount": "500"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "employee_not_found");

    let (_, list) = get(&app, "/api/v1/expenses").await;
    assert_eq!(list["meta"]["total"], 0);

    let (status, expense) = post(
        &app,
        "/api/v1/expenses/pay-salary",
        json!({"employee_id": employee_id, "amount": "500"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["name"], "Meena");
    assert_eq!(expense["payment_type"], "Salary");
    assert_eq!(expense["employee_id"], employee_id.as_str());
    assert_eq!(decimal(&expense["previous_balance"]), dec!(0));

    let (_, totals) = get(&app, "/api/v1/ledger/totals").await;
    assert_eq!(decimal(&totals["balance"]), dec!(-500));
}

#[tokio::test]
async fn test_malformed_salary_body_is_a_validation_error() {
    let app = setup_app().await;

    let (status, body) = post(
        &app,
        "/api/v1/expenses/pay-salary",
        json!({"employee_id": "nope", "amount": "500"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_amount_beyond_money_column_is_rejected() {
    let app = setup_app().await;

    for amount in ["10.005", "10000000000"] {
        let (status, body) = post(
            &app,
            "/api/v1/income",
            json!({"name": "Sales", "amount": amount, "payment_type": "Cash"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_amount");
    }

    let (status, body) = post(
        &app,
        "/api/v1/income",
        json!({"name": "Sales", "amount": "10.05", "payment_type": "Cash"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&body["previous_balance"]), dec!(0));

    let (_, expense) = post(
        &app,
        "/api/v1/expenses",
        json!({"name": "Tea", "amount": "0.10", "payment_type": "Cash"}),
    )
    .await;
    assert_eq!(decimal(&expense["previous_balance"]), dec!(10.05));

    let (_, totals) = get(&app, "/api/v1/ledger/totals").await;
    assert_eq!(decimal(&totals["balance"]), dec!(9.95));
}

#[tokio::test]
async fn test_patch_changes_descriptive_fields_only() {
    let app = setup_app().await;
    let id = create(
        &app,
        "/api/v1/income",
        json!({"name": "Sales", "amount": "100", "payment_type": "Cash"}),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/income/{id}"),
        Some(json!({"name": "Counter sales", "amount": "999"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Counter sales");
    assert_eq!(decimal(&body["amount"]), dec!(100));
}

#[tokio::test]
async fn test_delete_entry() {
    let app = setup_app().await;
    let id = create(
        &app,
        "/api/v1/expenses",
        json!({"name": "Rent", "amount": "100", "payment_type": "Cash"}),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/expenses/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(&app, &format!("/api/v1/expenses/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "entry_not_found");
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = setup_app().await;
    create(
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
    create(
        &app,
        "/api/v1/products",
        json!({
            "product_name": "Pen",
            "category_name": "Stationery",
            "purchase_price": "5",
            "sell_price": "8",
            "quantity": 3
        }),
    )
    .await;

    let (status, body) = get(&app, "/api/v1/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_vendors"], 1);
    assert_eq!(body["total_customers"], 0);
    assert_eq!(body["total_invoices"], 0);
    assert_eq!(body["low_stock_products"], 1);
}
