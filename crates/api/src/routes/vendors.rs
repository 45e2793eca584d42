//! Vendor routes.

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
    entities::vendors,
    repositories::{InvoiceRepository, PartyOutstanding, VendorInput, VendorRepository},
};
use billbook_shared::types::PageRequest;

/// Creates the vendor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(list_vendors).post(create_vendor))
        .route(
            "/vendors/{id}",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
        .route("/vendors/{id}/outstanding", get(get_vendor_outstanding))
}

/// Request body for creating or replacing a vendor.
#[derive(Debug, Deserialize, Validate)]
pub struct VendorRequest {
    /// Contact name.
    #[validate(length(min = 1, max = 100))]
    pub vendor_name: String,
    /// Company name.
    #[validate(length(min = 1, max = 100))]
    pub company_name: String,
    /// Mobile number.
    #[validate(length(min = 1, max = 15))]
    pub mobile_number: String,
    /// City.
    #[validate(length(min = 1, max = 50))]
    pub city: String,
}

impl From<VendorRequest> for VendorInput {
    fn from(req: VendorRequest) -> Self {
        Self {
            vendor_name: req.vendor_name,
            company_name: req.company_name,
            mobile_number: req.mobile_number,
            city: req.city,
        }
    }
}

/// Response for a vendor.
#[derive(Debug, Serialize)]
pub struct VendorResponse {
    /// Vendor ID.
    pub id: Uuid,
    /// Contact name.
    pub vendor_name: String,
    /// Company name.
    pub company_name: String,
    /// Mobile number.
    pub mobile_number: String,
    /// City.
    pub city: String,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<vendors::Model> for VendorResponse {
    fn from(m: vendors::Model) -> Self {
        Self {
            id: m.id,
            vendor_name: m.vendor_name,
            company_name: m.company_name,
            mobile_number: m.mobile_number,
            city: m.city,
            created_at: m.created_at,
        }
    }
}

/// Outstanding balance owed to or by a party.
#[derive(Debug, Serialize)]
pub struct OutstandingResponse {
    /// Party ID.
    pub id: Uuid,
    /// Customer or vendor name.
    pub name: String,
    /// Sum of `total_amount - paid_amount` over the party's invoices.
    pub outstanding_amount: Decimal,
}

impl From<PartyOutstanding> for OutstandingResponse {
    fn from(p: PartyOutstanding) -> Self {
        Self {
            id: p.id,
            name: p.name,
            outstanding_amount: p.outstanding_amount,
        }
    }
}

async fn list_vendors(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = VendorRepository::new((*state.db).clone());
    let vendors = repo.list(&page).await?;
    Ok(Json(vendors.map(VendorResponse::from)))
}

async fn create_vendor(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<VendorRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = VendorRepository::new((*state.db).clone());
    let vendor = repo.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(VendorResponse::from(vendor))))
}

async fn get_vendor(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = VendorRepository::new((*state.db).clone());
    Ok(Json(VendorResponse::from(repo.get(id).await?)))
}

async fn update_vendor(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<VendorRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = VendorRepository::new((*state.db).clone());
    let vendor = repo.update(id, payload.into()).await?;
    Ok(Json(VendorResponse::from(vendor)))
}

async fn delete_vendor(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = VendorRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /vendors/{id}/outstanding
async fn get_vendor_outstanding(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InvoiceRepository::new((*state.db).clone());
    let outstanding = repo.vendor_outstanding(id).await?;
    Ok(Json(OutstandingResponse::from(outstanding)))
}
