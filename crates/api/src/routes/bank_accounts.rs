//! Bank account routes. Accounts are reference data and never touch the ledger.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError};
use billbook_db::{
    entities::bank_accounts,
    repositories::{BankAccountInput, BankAccountRepository},
};
use billbook_shared::types::PageRequest;

/// Creates the bank account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bank-accounts", get(list_accounts).post(create_account))
        .route(
            "/bank-accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

/// Request body for creating or replacing a bank account.
#[derive(Debug, Deserialize, Validate)]
pub struct BankAccountRequest {
    /// Account holder name.
    #[validate(length(min = 1, max = 100))]
    pub account_name: String,
    /// Account number.
    #[validate(length(min = 1, max = 50))]
    pub account_number: String,
    /// Bank name.
    #[validate(length(min = 1, max = 100))]
    pub bank_name: String,
    /// IFSC branch code.
    #[validate(length(min = 1, max = 20))]
    pub ifsc_code: String,
    /// Opening balance (default: 0).
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Initial amount (default: 0).
    #[serde(default)]
    pub initial_amount: Decimal,
}

impl From<BankAccountRequest> for BankAccountInput {
    fn from(req: BankAccountRequest) -> Self {
        Self {
            account_name: req.account_name,
            account_number: req.account_number,
            bank_name: req.bank_name,
            ifsc_code: req.ifsc_code,
            opening_balance: req.opening_balance,
            initial_amount: req.initial_amount,
        }
    }
}

/// Response for a bank account.
#[derive(Debug, Serialize)]
pub struct BankAccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Account holder name.
    pub account_name: String,
    /// Account number.
    pub account_number: String,
    /// Bank name.
    pub bank_name: String,
    /// IFSC branch code.
    pub ifsc_code: String,
    /// Opening balance.
    pub opening_balance: Decimal,
    /// Initial amount.
    pub initial_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<bank_accounts::Model> for BankAccountResponse {
    fn from(m: bank_accounts::Model) -> Self {
        Self {
            id: m.id,
            account_name: m.account_name,
            account_number: m.account_number,
            bank_name: m.bank_name,
            ifsc_code: m.ifsc_code,
            opening_balance: m.opening_balance,
            initial_amount: m.initial_amount,
            created_at: m.created_at,
        }
    }
}

async fn list_accounts(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BankAccountRepository::new((*state.db).clone());
    let accounts = repo.list(&page).await?;
    Ok(Json(accounts.map(BankAccountResponse::from)))
}

async fn create_account(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BankAccountRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = BankAccountRepository::new((*state.db).clone());
    let account = repo.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(BankAccountResponse::from(account))))
}

async fn get_account(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BankAccountRepository::new((*state.db).clone());
    Ok(Json(BankAccountResponse::from(repo.get(id).await?)))
}

async fn update_account(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<BankAccountRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = BankAccountRepository::new((*state.db).clone());
    let account = repo.update(id, payload.into()).await?;
    Ok(Json(BankAccountResponse::from(account)))
}

async fn delete_account(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = BankAccountRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
