//! Dashboard repository for aggregate metrics.
//!
//! Every figure is computed fresh from the tables on each call.

use billbook_core::dashboard::{DashboardSummary, EntityCounts};
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, sea_query::Expr,
};

use super::ledger::totals_on;
use crate::entities::{customers, employees, invoices, products, vendors};

/// Error types for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Dashboard repository for metrics queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the dashboard summary.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the database queries fail.
    pub async fn summary(&self) -> Result<DashboardSummary, DashboardError> {
        let counts = EntityCounts {
            vendors: vendors::Entity::find().count(&self.db).await?,
            customers: customers::Entity::find().count(&self.db).await?,
            employees: employees::Entity::find().count(&self.db).await?,
            invoices: invoices::Entity::find().count(&self.db).await?,
        };
        let totals = totals_on(&self.db).await?;
        let low_stock = self.low_stock_count().await?;

        Ok(DashboardSummary::new(counts, totals, low_stock))
    }

    /// Number of products at or below their stock alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn low_stock_count(&self) -> Result<u64, DashboardError> {
        let count = products::Entity::find()
            .filter(
                Expr::col((products::Entity, products::Column::Quantity))
                    .lte(Expr::col((products::Entity, products::Column::StockAlert))),
            )
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
