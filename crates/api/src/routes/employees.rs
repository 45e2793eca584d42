//! Employee routes.

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
    entities::employees,
    repositories::{CreateEmployeeInput, EmployeeRepository, UpdateEmployeeInput},
};
use billbook_shared::types::PageRequest;

/// Creates the employee routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// Request body for creating or replacing an employee.
#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeRequest {
    /// Employee name.
    #[validate(length(min = 1, max = 100))]
    pub employee_name: String,
    /// Mobile number.
    #[validate(length(min = 1, max = 15))]
    pub mobile_number: String,
    /// City.
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    /// Informational salary balance (default: 0 on create, unchanged on update).
    pub salary_balance: Option<Decimal>,
}

/// Response for an employee.
#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    /// Employee ID.
    pub id: Uuid,
    /// Employee name.
    pub employee_name: String,
    /// Mobile number.
    pub mobile_number: String,
    /// City.
    pub city: String,
    /// Salary balance. Not changed by salary payments.
    pub salary_balance: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<employees::Model> for EmployeeResponse {
    fn from(m: employees::Model) -> Self {
        Self {
            id: m.id,
            employee_name: m.employee_name,
            mobile_number: m.mobile_number,
            city: m.city,
            salary_balance: m.salary_balance,
            created_at: m.created_at,
        }
    }
}

async fn list_employees(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = EmployeeRepository::new((*state.db).clone());
    let employees = repo.list(&page).await?;
    Ok(Json(employees.map(EmployeeResponse::from)))
}

async fn create_employee(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<EmployeeRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = EmployeeRepository::new((*state.db).clone());
    let employee = repo
        .create(CreateEmployeeInput {
            employee_name: payload.employee_name,
            mobile_number: payload.mobile_number,
            city: payload.city,
            salary_balance: payload.salary_balance,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

async fn get_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = EmployeeRepository::new((*state.db).clone());
    Ok(Json(EmployeeResponse::from(repo.get(id).await?)))
}

async fn update_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<EmployeeRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = EmployeeRepository::new((*state.db).clone());
    let employee = repo
        .update(
            id,
            UpdateEmployeeInput {
                employee_name: payload.employee_name,
                mobile_number: payload.mobile_number,
                city: payload.city,
                salary_balance: payload.salary_balance,
            },
        )
        .await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

async fn delete_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = EmployeeRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
