//! Customer routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::vendors::OutstandingResponse;
use crate::{AppState, error::ApiError};
use billbook_db::{
    entities::customers,
    repositories::{CustomerInput, CustomerRepository, InvoiceRepository},
};
use billbook_shared::types::PageRequest;

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/customers/{id}/outstanding", get(get_customer_outstanding))
}

/// Request body for creating or replacing a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerRequest {
    /// Customer name.
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    /// Shop name.
    #[validate(length(max = 100))]
    pub shop_name: Option<String>,
    /// Mobile number; used verbatim in share links.
    #[validate(length(min = 1, max = 15))]
    pub mobile_number: String,
    /// City.
    #[validate(length(min = 1, max = 50))]
    pub city: String,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(req: CustomerRequest) -> Self {
        Self {
            customer_name: req.customer_name,
            shop_name: req.shop_name,
            mobile_number: req.mobile_number,
            city: req.city,
        }
    }
}

/// Response for a customer.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// Customer ID.
    pub id: Uuid,
    /// Customer name.
    pub customer_name: String,
    /// Shop name.
    pub shop_name: Option<String>,
    /// Mobile number.
    pub mobile_number: String,
    /// City.
    pub city: String,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<customers::Model> for CustomerResponse {
    fn from(m: customers::Model) -> Self {
        Self {
            id: m.id,
            customer_name: m.customer_name,
            shop_name: m.shop_name,
            mobile_number: m.mobile_number,
            city: m.city,
            created_at: m.created_at,
        }
    }
}

async fn list_customers(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CustomerRepository::new((*state.db).clone());
    let customers = repo.list(&page).await?;
    Ok(Json(customers.map(CustomerResponse::from)))
}

async fn create_customer(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CustomerRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = CustomerRepository::new((*state.db).clone());
    let customer = repo.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

async fn get_customer(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CustomerRepository::new((*state.db).clone());
    Ok(Json(CustomerResponse::from(repo.get(id).await?)))
}

async fn update_customer(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<CustomerRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = CustomerRepository::new((*state.db).clone());
    let customer = repo.update(id, payload.into()).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

async fn delete_customer(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = CustomerRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /customers/{id}/outstanding
async fn get_customer_outstanding(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InvoiceRepository::new((*state.db).clone());
    let outstanding = repo.customer_outstanding(id).await?;
    Ok(Json(OutstandingResponse::from(outstanding)))
}
