//! Invoice routes: creation with stock reconciliation, payments and sharing.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError};
use billbook_core::invoicing::{InvoiceDraft, InvoiceLineInput, InvoiceType};
use billbook_db::repositories::{
    InvoiceDetails, InvoiceFilter, InvoiceItemDetails, InvoiceRepository, UpdateInvoiceAmounts,
};
use billbook_shared::types::{CustomerId, PageRequest, ProductId, VendorId};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).patch(update_invoice).delete(delete_invoice),
        )
        .route("/invoices/{id}/share", get(share_invoice))
}

/// Query parameters for listing invoices.
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    /// Filter by type (`SALE` or `PURCHASE`, case-insensitive).
    pub invoice_type: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Largest quantity accepted on a single line.
const MAX_LINE_QUANTITY: i32 = 1_000_000;

/// One requested line item.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct InvoiceItemRequest {
    /// Product sold or bought.
    pub product_id: Option<Uuid>,
    /// Units; must be positive.
    #[validate(range(max = MAX_LINE_QUANTITY))]
    pub quantity: i32,
    /// Unit price.
    pub price: Decimal,
}

/// Request body for creating an invoice.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    /// `SALE` or `PURCHASE`.
    #[validate(length(max = 20))]
    pub invoice_type: String,
    /// Customer (sale invoices only).
    pub customer_id: Option<Uuid>,
    /// Vendor (purchase invoices only).
    pub vendor_id: Option<Uuid>,
    /// Invoice date (default: today, UTC).
    pub date: Option<NaiveDate>,
    /// Invoice total.
    pub total_amount: Decimal,
    /// Amount already paid (default: 0).
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Line items.
    #[serde(default)]
    #[validate(length(max = 500), nested)]
    pub items: Vec<InvoiceItemRequest>,
}

/// Request body for recording a payment or correcting the total.
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    /// New total.
    pub total_amount: Option<Decimal>,
    /// New paid amount.
    pub paid_amount: Option<Decimal>,
}

/// Response for an invoice line item.
#[derive(Debug, Serialize)]
pub struct InvoiceItemResponse {
    /// Item ID.
    pub id: Uuid,
    /// Product, when it resolved and still exists.
    pub product_id: Option<Uuid>,
    /// Product name at read time.
    pub product_name: Option<String>,
    /// Units.
    pub quantity: i32,
    /// Unit price.
    pub price: Decimal,
}

impl From<InvoiceItemDetails> for InvoiceItemResponse {
    fn from(d: InvoiceItemDetails) -> Self {
        Self {
            id: d.item.id,
            product_id: d.item.product_id,
            product_name: d.product_name,
            quantity: d.item.quantity,
            price: d.item.price,
        }
    }
}

/// Response for an invoice.
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    /// Invoice ID.
    pub id: Uuid,
    /// `SALE` or `PURCHASE`.
    pub invoice_type: InvoiceType,
    /// Customer ID.
    pub customer_id: Option<Uuid>,
    /// Customer name.
    pub customer_name: Option<String>,
    /// Vendor ID.
    pub vendor_id: Option<Uuid>,
    /// Vendor name.
    pub vendor_name: Option<String>,
    /// Invoice date.
    pub date: NaiveDate,
    /// Invoice total.
    pub total_amount: Decimal,
    /// Amount paid.
    pub paid_amount: Decimal,
    /// `total_amount - paid_amount`; negative when overpaid.
    pub outstanding_amount: Decimal,
    /// Line items.
    pub items: Vec<InvoiceItemResponse>,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<InvoiceDetails> for InvoiceResponse {
    fn from(d: InvoiceDetails) -> Self {
        let invoice = d.invoice;
        Self {
            id: invoice.id,
            invoice_type: invoice.invoice_type.into(),
            customer_id: invoice.customer_id,
            customer_name: d.customer_name,
            vendor_id: invoice.vendor_id,
            vendor_name: d.vendor_name,
            date: invoice.date,
            total_amount: invoice.total_amount,
            paid_amount: invoice.paid_amount,
            outstanding_amount: d.outstanding,
            items: d.items.into_iter().map(InvoiceItemResponse::from).collect(),
            created_at: invoice.created_at,
        }
    }
}

fn parse_invoice_type(value: &str) -> Result<InvoiceType, ApiError> {
    value
        .parse()
        .map_err(|e: String| ApiError::bad_request("INVALID_INVOICE_TYPE", e))
}

async fn list_invoices(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListInvoicesQuery>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = InvoiceFilter {
        invoice_type: query
            .invoice_type
            .as_deref()
            .map(parse_invoice_type)
            .transpose()?,
    };
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    let invoices = repo.list(filter, &page).await?;
    Ok(Json(invoices.map(InvoiceResponse::from)))
}

/// POST /invoices
///
/// Creates the invoice and moves stock in one transaction.
async fn create_invoice(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateInvoiceRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let draft = InvoiceDraft {
        invoice_type: parse_invoice_type(&payload.invoice_type)?,
        customer_id: payload.customer_id.map(CustomerId::from_uuid),
        vendor_id: payload.vendor_id.map(VendorId::from_uuid),
        date: payload.date,
        total_amount: payload.total_amount,
        paid_amount: payload.paid_amount,
        items: payload
            .items
            .into_iter()
            .map(|item| InvoiceLineInput {
                product_id: item.product_id.map(ProductId::from_uuid),
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    let invoice = repo.create(draft).await?;
    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(invoice))))
}

async fn get_invoice(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InvoiceRepository::new((*state.db).clone());
    Ok(Json(InvoiceResponse::from(repo.get(id).await?)))
}

/// PATCH /invoices/{id}
///
/// Amounts only; stock is never touched after creation.
async fn update_invoice(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateInvoiceRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InvoiceRepository::new((*state.db).clone());
    let invoice = repo
        .update_amounts(
            id,
            UpdateInvoiceAmounts {
                total_amount: payload.total_amount,
                paid_amount: payload.paid_amount,
            },
        )
        .await?;
    Ok(Json(InvoiceResponse::from(invoice)))
}

async fn delete_invoice(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InvoiceRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /invoices/{id}/share
async fn share_invoice(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = InvoiceRepository::new((*state.db).clone());
    let url = repo.share_link(id).await?;
    Ok(Json(json!({ "url": url })))
}
