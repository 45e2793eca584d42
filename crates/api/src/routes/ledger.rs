//! Income and expense routes over the single running-balance ledger.
//!
//! Entries are append-only in effect: amount, date and `previous_balance`
//! are fixed at insert time. A `previous_balance` sent by a client is ignored.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError};
use billbook_core::ledger::{LedgerError, LedgerKind, NewLedgerEntry, SalaryPayment};
use billbook_db::repositories::{LedgerEntry, LedgerRepository, UpdateLedgerEntryInput};
use billbook_shared::types::{EmployeeId, PageRequest};

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/income", get(list_income).post(create_income))
        .route(
            "/income/{id}",
            get(get_income).patch(update_income).delete(delete_income),
        )
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/pay-salary", post(pay_salary))
        .route(
            "/expenses/{id}",
            get(get_expense).patch(update_expense).delete(delete_expense),
        )
        .route("/ledger/totals", get(get_totals))
}

/// Request body for recording an income or expense.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    /// Source of income or reason for the expense.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: String,
    /// Amount; must be greater than zero.
    pub amount: Option<Decimal>,
    /// Payment method, e.g. "Cash".
    #[serde(default)]
    #[validate(length(max = 50))]
    pub payment_type: String,
    /// External transaction reference.
    #[validate(length(max = 100))]
    pub transaction_id: Option<String>,
    /// Linked employee. Only accepted on expenses.
    pub employee_id: Option<Uuid>,
}

impl CreateEntryRequest {
    fn into_entry(self, kind: LedgerKind) -> Result<NewLedgerEntry, LedgerError> {
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;
        let mut entry = match kind {
            LedgerKind::Income => NewLedgerEntry::income(self.name, amount, self.payment_type),
            LedgerKind::Expense => NewLedgerEntry::expense(self.name, amount, self.payment_type),
        };
        if let Some(transaction_id) = self.transaction_id {
            entry = entry.with_transaction_id(transaction_id);
        }
        if let Some(employee_id) = self.employee_id {
            entry = entry.with_employee(EmployeeId::from_uuid(employee_id));
        }
        Ok(entry)
    }
}

/// Request body for editing the descriptive fields of an entry.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntryRequest {
    /// New name.
    #[validate(length(max = 100))]
    pub name: Option<String>,
    /// New payment method.
    #[validate(length(max = 50))]
    pub payment_type: Option<String>,
    /// New transaction reference.
    #[validate(length(max = 100))]
    pub transaction_id: Option<String>,
}

/// Request body for paying an employee.
///
/// Presence and amount rules are checked when the payment is built.
#[derive(Debug, Deserialize, Validate)]
pub struct PaySalaryRequest {
    /// Employee being paid.
    pub employee_id: Option<Uuid>,
    /// Amount paid.
    pub amount: Option<Decimal>,
}

/// Response for a ledger entry.
#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// `income` or `expense`.
    pub kind: LedgerKind,
    /// Name.
    pub name: String,
    /// Entry date.
    pub date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
    /// Net balance immediately before this entry was applied.
    pub previous_balance: Decimal,
    /// Payment method.
    pub payment_type: String,
    /// External transaction reference.
    pub transaction_id: String,
    /// Linked employee, if any.
    pub employee_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(e: LedgerEntry) -> Self {
        Self {
            id: e.id,
            kind: e.kind,
            name: e.name,
            date: e.date,
            amount: e.amount,
            previous_balance: e.previous_balance,
            payment_type: e.payment_type,
            transaction_id: e.transaction_id,
            employee_id: e.employee_id,
            created_at: e.created_at,
        }
    }
}

/// Response for the ledger totals.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// Sum of all income.
    pub total_income: Decimal,
    /// Sum of all expenses.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
}

async fn list_entries(
    state: AppState,
    kind: LedgerKind,
    page: PageRequest,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());
    let entries = repo.list(kind, &page).await?;
    Ok(Json(entries.map(LedgerEntryResponse::from)))
}

async fn create_entry(
    state: AppState,
    kind: LedgerKind,
    payload: CreateEntryRequest,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let entry = payload.into_entry(kind)?;
    let repo = LedgerRepository::new((*state.db).clone());
    let stored = repo.record(entry).await?;
    Ok((StatusCode::CREATED, Json(LedgerEntryResponse::from(stored))))
}

async fn get_entry(
    state: AppState,
    kind: LedgerKind,
    id: Uuid,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());
    Ok(Json(LedgerEntryResponse::from(repo.get(kind, id).await?)))
}

async fn update_entry(
    state: AppState,
    kind: LedgerKind,
    id: Uuid,
    payload: UpdateEntryRequest,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = LedgerRepository::new((*state.db).clone());
    let entry = repo
        .update(
            kind,
            id,
            UpdateLedgerEntryInput {
                name: payload.name,
                payment_type: payload.payment_type,
                transaction_id: payload.transaction_id,
            },
        )
        .await?;
    Ok(Json(LedgerEntryResponse::from(entry)))
}

async fn delete_entry(
    state: AppState,
    kind: LedgerKind,
    id: Uuid,
) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());
    repo.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_income(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    list_entries(state, LedgerKind::Income, page).await
}

async fn create_income(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEntryRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    create_entry(state, LedgerKind::Income, payload).await
}

async fn get_income(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    get_entry(state, LedgerKind::Income, id).await
}

async fn update_income(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateEntryRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    update_entry(state, LedgerKind::Income, id, payload).await
}

async fn delete_income(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    delete_entry(state, LedgerKind::Income, id).await
}

async fn list_expenses(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    list_entries(state, LedgerKind::Expense, page).await
}

async fn create_expense(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEntryRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    create_entry(state, LedgerKind::Expense, payload).await
}

async fn get_expense(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    get_entry(state, LedgerKind::Expense, id).await
}

async fn update_expense(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateEntryRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    update_entry(state, LedgerKind::Expense, id, payload).await
}

async fn delete_expense(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    delete_entry(state, LedgerKind::Expense, id).await
}

/// POST /expenses/pay-salary
///
/// Records an expense named after the employee, paid as "Salary".
async fn pay_salary(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<PaySalaryRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let payment = SalaryPayment::from_parts(
        payload.employee_id.map(EmployeeId::from_uuid),
        payload.amount,
    )?;
    let repo = LedgerRepository::new((*state.db).clone());
    let stored = repo.pay_salary(payment).await?;
    Ok((StatusCode::CREATED, Json(LedgerEntryResponse::from(stored))))
}

/// GET /ledger/totals
async fn get_totals(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = LedgerRepository::new((*state.db).clone());
    let totals = repo.totals().await?;
    Ok(Json(TotalsResponse {
        total_income: totals.total_income,
        total_expense: totals.total_expense,
        balance: totals.balance(),
    }))
}
