//! Product routes, including the low-stock listing.

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
use billbook_core::entity::{DEFAULT_STOCK_ALERT, is_low_stock};
use billbook_db::{
    entities::products,
    repositories::{CreateProductInput, ProductRepository, UpdateProductInput},
};
use billbook_shared::types::PageRequest;

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/stock-alerts", get(list_stock_alerts))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Request body for creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Product name.
    #[validate(length(min = 1, max = 100))]
    pub product_name: String,
    /// Category name.
    #[validate(length(min = 1, max = 50))]
    pub category_name: String,
    /// Purchase price.
    pub purchase_price: Decimal,
    /// Sell price.
    pub sell_price: Decimal,
    /// Opening stock (default: 0).
    pub quantity: Option<i32>,
    /// Low-stock threshold (default: 10).
    pub stock_alert: Option<i32>,
    /// Free-form weight label.
    #[validate(length(max = 20))]
    pub weight: Option<String>,
}

/// Request body for replacing a product. Stock only moves through invoices.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// Product name.
    #[validate(length(min = 1, max = 100))]
    pub product_name: String,
    /// Category name.
    #[validate(length(min = 1, max = 50))]
    pub category_name: String,
    /// Purchase price.
    pub purchase_price: Decimal,
    /// Sell price.
    pub sell_price: Decimal,
    /// Low-stock threshold (default: 10).
    pub stock_alert: Option<i32>,
    /// Free-form weight label.
    #[validate(length(max = 20))]
    pub weight: Option<String>,
}

/// Response for a product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: Uuid,
    /// Product name.
    pub product_name: String,
    /// Category name.
    pub category_name: String,
    /// Purchase price.
    pub purchase_price: Decimal,
    /// Sell price.
    pub sell_price: Decimal,
    /// Units on hand; negative when backordered.
    pub quantity: i32,
    /// Low-stock threshold.
    pub stock_alert: i32,
    /// Whether `quantity <= stock_alert`.
    pub low_stock: bool,
    /// Free-form weight label.
    pub weight: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<products::Model> for ProductResponse {
    fn from(m: products::Model) -> Self {
        Self {
            id: m.id,
            low_stock: is_low_stock(m.quantity, m.stock_alert),
            product_name: m.product_name,
            category_name: m.category_name,
            purchase_price: m.purchase_price,
            sell_price: m.sell_price,
            quantity: m.quantity,
            stock_alert: m.stock_alert,
            weight: m.weight,
            created_at: m.created_at,
        }
    }
}

async fn list_products(
    State(state): State<AppState>,
    WithRejection(Query(page), _): WithRejection<Query<PageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new((*state.db).clone());
    let products = repo.list(&page).await?;
    Ok(Json(products.map(ProductResponse::from)))
}

/// GET /products/stock-alerts
///
/// Every product at or below its alert threshold.
async fn list_stock_alerts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new((*state.db).clone());
    let products: Vec<ProductResponse> = repo
        .low_stock()
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    Ok(Json(products))
}

async fn create_product(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateProductRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = ProductRepository::new((*state.db).clone());
    let product = repo
        .create(CreateProductInput {
            product_name: payload.product_name,
            category_name: payload.category_name,
            purchase_price: payload.purchase_price,
            sell_price: payload.sell_price,
            quantity: payload.quantity,
            stock_alert: payload.stock_alert,
            weight: payload.weight,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

async fn get_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new((*state.db).clone());
    Ok(Json(ProductResponse::from(repo.get(id).await?)))
}

async fn update_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateProductRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let repo = ProductRepository::new((*state.db).clone());
    let product = repo
        .update(
            id,
            UpdateProductInput {
                product_name: payload.product_name,
                category_name: payload.category_name,
                purchase_price: payload.purchase_price,
                sell_price: payload.sell_price,
                stock_alert: payload.stock_alert.unwrap_or(DEFAULT_STOCK_ALERT),
                weight: payload.weight,
            },
        )
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

async fn delete_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = ProductRepository::new((*state.db).clone());
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
