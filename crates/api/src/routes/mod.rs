//! API route definitions.

pub mod bank_accounts;
pub mod customers;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod invoices;
pub mod ledger;
pub mod products;
pub mod vendors;

use axum::Router;

use crate::AppState;

/// Creates all API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dashboard::routes())
        .merge(vendors::routes())
        .merge(customers::routes())
        .merge(employees::routes())
        .merge(products::routes())
        .merge(bank_accounts::routes())
        .merge(ledger::routes())
        .merge(invoices::routes())
}
