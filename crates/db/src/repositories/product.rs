//! Product repository.
//!
//! Stock `quantity` is set once at creation and afterwards changes only
//! through invoices.

use billbook_core::entity::{DEFAULT_STOCK_ALERT, EntityKind, validate_product};
use billbook_shared::types::{PageRequest, PageResponse, ProductId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, sea_query::Expr,
};
use tracing::info;
use uuid::Uuid;

use super::store::{StoreError, page_of};
use crate::entities::products;

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Product name.
    pub product_name: String,
    /// Category.
    pub category_name: String,
    /// Cost price.
    pub purchase_price: Decimal,
    /// Selling price.
    pub sell_price: Decimal,
    /// Opening stock (defaults to zero).
    pub quantity: Option<i32>,
    /// Low-stock threshold (defaults to 10).
    pub stock_alert: Option<i32>,
    /// Free-form weight label.
    pub weight: Option<String>,
}

/// Input for replacing a product's descriptive fields.
#[derive(Debug, Clone)]
pub struct UpdateProductInput {
    /// Product name.
    pub product_name: String,
    /// Category.
    pub category_name: String,
    /// Cost price.
    pub purchase_price: Decimal,
    /// Selling price.
    pub sell_price: Decimal,
    /// Low-stock threshold.
    pub stock_alert: i32,
    /// Free-form weight label.
    pub weight: Option<String>,
}

/// Product repository for CRUD and stock queries.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for negative prices or threshold, or a database error.
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, StoreError> {
        let stock_alert = input.stock_alert.unwrap_or(DEFAULT_STOCK_ALERT);
        validate_product(input.purchase_price, input.sell_price, stock_alert)?;

        let product = products::ActiveModel {
            id: Set(ProductId::new().into_inner()),
            product_name: Set(input.product_name),
            category_name: Set(input.category_name),
            purchase_price: Set(input.purchase_price),
            sell_price: Set(input.sell_price),
            quantity: Set(input.quantity.unwrap_or(0)),
            stock_alert: Set(stock_alert),
            weight: Set(input.weight),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(product_id = %product.id, quantity = product.quantity, "Product created");
        Ok(product)
    }

    /// Finds a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    pub async fn get(&self, id: Uuid) -> Result<products::Model, StoreError> {
        products::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))
    }

    /// Lists products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<products::Model>, StoreError> {
        let total = products::Entity::find().count(&self.db).await?;
        let rows = products::Entity::find()
            .order_by_asc(products::Column::CreatedAt)
            .order_by_asc(products::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;
        Ok(page_of(rows, page, total))
    }

    /// Lists every product at or below its stock alert, lowest stock first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn low_stock(&self) -> Result<Vec<products::Model>, StoreError> {
        let rows = products::Entity::find()
            .filter(
                Expr::col((products::Entity, products::Column::Quantity))
                    .lte(Expr::col((products::Entity, products::Column::StockAlert))),
            )
            .order_by_asc(products::Column::Quantity)
            .order_by_asc(products::Column::ProductName)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Replaces a product's descriptive fields. Stock quantity is untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist or `Invalid` for a
    /// negative price or threshold.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<products::Model, StoreError> {
        validate_product(input.purchase_price, input.sell_price, input.stock_alert)?;

        let mut product: products::ActiveModel = self.get(id).await?.into();
        product.product_name = Set(input.product_name);
        product.category_name = Set(input.category_name);
        product.purchase_price = Set(input.purchase_price);
        product.sell_price = Set(input.sell_price);
        product.stock_alert = Set(input.stock_alert);
        product.weight = Set(input.weight);
        let product = product.update(&self.db).await?;

        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Deletes a product. Invoice lines keep their rows with the product cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = products::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found(EntityKind::Product, id));
        }

        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
