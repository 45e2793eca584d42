//! Invoice repository with stock reconciliation.
//!
//! Creating an invoice writes the invoice, its items and every stock
//! adjustment in one transaction. Stock moves through single-statement
//! `quantity = quantity + delta` updates so concurrent invoices on the same
//! product never lose an adjustment.

use std::collections::HashMap;

use billbook_core::invoicing::{
    InvoiceDraft, InvoiceError, InvoiceService, InvoiceType, Party, ShareRecipient,
    StockMovement, outstanding, share_message, share_url, total_outstanding,
};
use billbook_shared::types::{InvoiceId, InvoiceItemId, PageRequest, PageResponse, ProductId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::Expr,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::store::page_of;
use crate::entities::{
    customers, invoice_items, invoices, products, sea_orm_active_enums::InvoiceKind, vendors,
};

/// Error types for invoice repository operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceRepoError {
    /// Invoice rule violation or missing record.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// An invoice line with its product name.
#[derive(Debug, Clone)]
pub struct InvoiceItemDetails {
    /// The stored line.
    pub item: invoice_items::Model,
    /// Name of the product, when it still exists.
    pub product_name: Option<String>,
}

/// An invoice with its lines, party names and outstanding amount.
#[derive(Debug, Clone)]
pub struct InvoiceDetails {
    /// The stored invoice.
    pub invoice: invoices::Model,
    /// Line items.
    pub items: Vec<InvoiceItemDetails>,
    /// Customer name for sale invoices.
    pub customer_name: Option<String>,
    /// Vendor name for purchase invoices.
    pub vendor_name: Option<String>,
    /// `total_amount - paid_amount`.
    pub outstanding: Decimal,
}

/// Filter options for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    /// Only invoices of this type.
    pub invoice_type: Option<InvoiceType>,
}

/// New amounts for an existing invoice. Absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct UpdateInvoiceAmounts {
    /// New total.
    pub total_amount: Option<Decimal>,
    /// New paid amount.
    pub paid_amount: Option<Decimal>,
}

/// Outstanding balance of one customer or vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyOutstanding {
    /// Party ID.
    pub id: Uuid,
    /// Customer or vendor name.
    pub name: String,
    /// Sum of outstanding over the party's invoices.
    pub outstanding_amount: Decimal,
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an invoice with its items and applies the stock movement.
    ///
    /// Items whose product cannot be found are stored without a product and
    /// move no stock. Any failure rolls back the invoice, its items and every
    /// adjustment made so far.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any write, `CustomerNotFound` /
    /// `VendorNotFound` for an unknown party, or a database error.
    pub async fn create(&self, draft: InvoiceDraft) -> Result<InvoiceDetails, InvoiceRepoError> {
        let party = InvoiceService::validate(&draft)?;
        let date = InvoiceService::invoice_date(&draft, chrono::Utc::now().date_naive());

        let txn = self.db.begin().await?;

        match party {
            Some(Party::Customer(customer_id)) => {
                let id = customer_id.into_inner();
                customers::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(InvoiceError::CustomerNotFound(id))?;
            }
            Some(Party::Vendor(vendor_id)) => {
                let id = vendor_id.into_inner();
                vendors::Entity::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or(InvoiceError::VendorNotFound(id))?;
            }
            None => {}
        }

        let now = chrono::Utc::now().into();
        let invoice = invoices::ActiveModel {
            id: Set(InvoiceId::new().into_inner()),
            invoice_type: Set(draft.invoice_type.into()),
            customer_id: Set(draft.customer_id.map(|id| id.into_inner())),
            vendor_id: Set(draft.vendor_id.map(|id| id.into_inner())),
            date: Set(date),
            total_amount: Set(draft.total_amount),
            paid_amount: Set(draft.paid_amount),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for line in &draft.items {
            let product = match line.product_id {
                Some(product_id) => {
                    products::Entity::find_by_id(product_id.into_inner())
                        .one(&txn)
                        .await?
                }
                None => None,
            };

            invoice_items::ActiveModel {
                id: Set(InvoiceItemId::new().into_inner()),
                invoice_id: Set(invoice.id),
                product_id: Set(product.as_ref().map(|p| p.id)),
                quantity: Set(line.quantity),
                price: Set(line.price),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;

            match product {
                Some(product) => {
                    let movement = StockMovement::for_line(
                        draft.invoice_type,
                        ProductId::from_uuid(product.id),
                        line.quantity,
                    );
                    apply_stock(&txn, movement).await?;
                }
                None => {
                    debug!(
                        invoice_id = %invoice.id,
                        product_id = ?line.product_id,
                        "Line item without a resolvable product, stock unchanged"
                    );
                }
            }
        }

        txn.commit().await?;

        info!(
            invoice_id = %invoice.id,
            invoice_type = %draft.invoice_type,
            items = draft.items.len(),
            total_amount = %invoice.total_amount,
            "Invoice created"
        );

        let mut details = hydrate(&self.db, vec![invoice]).await?;
        details
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound("invoice vanished after commit".to_string()).into())
    }

    /// Finds an invoice with its items.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound` if the invoice does not exist.
    pub async fn get(&self, id: Uuid) -> Result<InvoiceDetails, InvoiceRepoError> {
        let invoice = self.find(id).await?;
        let mut details = hydrate(&self.db, vec![invoice]).await?;
        details
            .pop()
            .ok_or_else(|| InvoiceError::InvoiceNotFound(id).into())
    }

    /// Lists invoices, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: InvoiceFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<InvoiceDetails>, InvoiceRepoError> {
        let mut query = invoices::Entity::find();
        if let Some(invoice_type) = filter.invoice_type {
            query = query.filter(invoices::Column::InvoiceType.eq(InvoiceKind::from(invoice_type)));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(invoices::Column::CreatedAt)
            .order_by_desc(invoices::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let details = hydrate(&self.db, rows).await?;
        Ok(page_of(details, page, total))
    }

    /// Records a payment or corrects the total. Stock is not touched.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` or `AmountOutOfRange` for a value the amount
    /// column must not hold, or `InvoiceNotFound`.
    pub async fn update_amounts(
        &self,
        id: Uuid,
        input: UpdateInvoiceAmounts,
    ) -> Result<InvoiceDetails, InvoiceRepoError> {
        if let Some(total_amount) = input.total_amount {
            InvoiceService::validate_amount("total_amount", total_amount)?;
        }
        if let Some(paid_amount) = input.paid_amount {
            InvoiceService::validate_amount("paid_amount", paid_amount)?;
        }

        let mut invoice: invoices::ActiveModel = self.find(id).await?.into();
        if let Some(total_amount) = input.total_amount {
            invoice.total_amount = Set(total_amount);
        }
        if let Some(paid_amount) = input.paid_amount {
            invoice.paid_amount = Set(paid_amount);
        }
        let invoice = invoice.update(&self.db).await?;

        info!(
            invoice_id = %id,
            total_amount = %invoice.total_amount,
            paid_amount = %invoice.paid_amount,
            "Invoice amounts updated"
        );

        let mut details = hydrate(&self.db, vec![invoice]).await?;
        details
            .pop()
            .ok_or_else(|| InvoiceError::InvoiceNotFound(id).into())
    }

    /// Deletes an invoice and its items. Stock already moved stays moved.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound` if the invoice does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), InvoiceRepoError> {
        let txn = self.db.begin().await?;
        invoice_items::Entity::delete_many()
            .filter(invoice_items::Column::InvoiceId.eq(id))
            .exec(&txn)
            .await?;
        let result = invoices::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(InvoiceError::InvoiceNotFound(id).into());
        }
        txn.commit().await?;

        info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    /// Total outstanding across a customer's invoices.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if the customer does not exist.
    pub async fn customer_outstanding(
        &self,
        customer_id: Uuid,
    ) -> Result<PartyOutstanding, InvoiceRepoError> {
        let customer = customers::Entity::find_by_id(customer_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::CustomerNotFound(customer_id))?;

        let amounts: Vec<(Decimal, Decimal)> = invoices::Entity::find()
            .select_only()
            .column(invoices::Column::TotalAmount)
            .column(invoices::Column::PaidAmount)
            .filter(invoices::Column::CustomerId.eq(customer_id))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(PartyOutstanding {
            id: customer.id,
            name: customer.customer_name,
            outstanding_amount: total_outstanding(amounts),
        })
    }

    /// Total outstanding across a vendor's invoices.
    ///
    /// # Errors
    ///
    /// Returns `VendorNotFound` if the vendor does not exist.
    pub async fn vendor_outstanding(
        &self,
        vendor_id: Uuid,
    ) -> Result<PartyOutstanding, InvoiceRepoError> {
        let vendor = vendors::Entity::find_by_id(vendor_id)
            .one(&self.db)
            .await?
            .ok_or(InvoiceError::VendorNotFound(vendor_id))?;

        let amounts: Vec<(Decimal, Decimal)> = invoices::Entity::find()
            .select_only()
            .column(invoices::Column::TotalAmount)
            .column(invoices::Column::PaidAmount)
            .filter(invoices::Column::VendorId.eq(vendor_id))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(PartyOutstanding {
            id: vendor.id,
            name: vendor.vendor_name,
            outstanding_amount: total_outstanding(amounts),
        })
    }

    /// Builds the chat share link for an invoice.
    ///
    /// The recipient is the customer when present, else the vendor, else
    /// nobody (empty name and number).
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound` if the invoice does not exist.
    pub async fn share_link(&self, id: Uuid) -> Result<String, InvoiceRepoError> {
        let invoice = self.find(id).await?;

        let customer = match invoice.customer_id {
            Some(customer_id) => customers::Entity::find_by_id(customer_id).one(&self.db).await?,
            None => None,
        };
        let recipient = match customer {
            Some(customer) => ShareRecipient {
                name: customer.customer_name,
                mobile: customer.mobile_number,
            },
            None => match invoice.vendor_id {
                Some(vendor_id) => vendors::Entity::find_by_id(vendor_id)
                    .one(&self.db)
                    .await?
                    .map(|vendor| ShareRecipient {
                        name: vendor.vendor_name,
                        mobile: vendor.mobile_number,
                    })
                    .unwrap_or_default(),
                None => ShareRecipient::default(),
            },
        };

        let message = share_message(
            &recipient.name,
            &invoice.id.to_string(),
            invoice.date,
            invoice.total_amount,
        );
        Ok(share_url(&recipient, &message))
    }

    async fn find(&self, id: Uuid) -> Result<invoices::Model, InvoiceRepoError> {
        invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| InvoiceError::InvoiceNotFound(id).into())
    }
}

async fn apply_stock<C: ConnectionTrait>(conn: &C, movement: StockMovement) -> Result<(), DbErr> {
    let product_id = movement.product_id.into_inner();
    products::Entity::update_many()
        .col_expr(
            products::Column::Quantity,
            Expr::col(products::Column::Quantity).add(movement.delta),
        )
        .filter(products::Column::Id.eq(product_id))
        .exec(conn)
        .await?;

    debug!(product_id = %product_id, delta = movement.delta, "Stock adjusted");
    Ok(())
}

/// Attaches items, product names, party names and outstanding to invoices,
/// preserving the input order.
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<invoices::Model>,
) -> Result<Vec<InvoiceDetails>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let invoice_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let items = invoice_items::Entity::find()
        .filter(invoice_items::Column::InvoiceId.is_in(invoice_ids))
        .order_by_asc(invoice_items::Column::CreatedAt)
        .order_by_asc(invoice_items::Column::Id)
        .all(conn)
        .await?;

    let product_ids: Vec<Uuid> = items.iter().filter_map(|i| i.product_id).collect();
    let product_names: HashMap<Uuid, String> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|p| (p.id, p.product_name))
            .collect()
    };

    let customer_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.customer_id).collect();
    let customer_names: HashMap<Uuid, String> = if customer_ids.is_empty() {
        HashMap::new()
    } else {
        customers::Entity::find()
            .filter(customers::Column::Id.is_in(customer_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|c| (c.id, c.customer_name))
            .collect()
    };

    let vendor_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.vendor_id).collect();
    let vendor_names: HashMap<Uuid, String> = if vendor_ids.is_empty() {
        HashMap::new()
    } else {
        vendors::Entity::find()
            .filter(vendors::Column::Id.is_in(vendor_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|v| (v.id, v.vendor_name))
            .collect()
    };

    let mut items_by_invoice: HashMap<Uuid, Vec<InvoiceItemDetails>> = HashMap::new();
    for item in items {
        let product_name = item
            .product_id
            .and_then(|id| product_names.get(&id).cloned());
        items_by_invoice
            .entry(item.invoice_id)
            .or_default()
            .push(InvoiceItemDetails { item, product_name });
    }

    Ok(rows
        .into_iter()
        .map(|invoice| InvoiceDetails {
            items: items_by_invoice.remove(&invoice.id).unwrap_or_default(),
            customer_name: invoice
                .customer_id
                .and_then(|id| customer_names.get(&id).cloned()),
            vendor_name: invoice
                .vendor_id
                .and_then(|id| vendor_names.get(&id).cloned()),
            outstanding: outstanding(invoice.total_amount, invoice.paid_amount),
            invoice,
        })
        .collect())
}
