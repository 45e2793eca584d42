//! Invoice domain types.

use billbook_shared::types::{CustomerId, ProductId, VendorId};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of invoice. Decides the direction of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceType {
    /// Goods sold to a customer; stock goes down.
    Sale,
    /// Goods bought from a vendor; stock goes up.
    Purchase,
}

impl InvoiceType {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Purchase => "PURCHASE",
        }
    }
}

impl std::fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SALE" => Ok(Self::Sale),
            "PURCHASE" => Ok(Self::Purchase),
            other => Err(format!("unknown invoice type: {other}")),
        }
    }
}

/// The counterparty of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// A customer (sale invoices).
    Customer(CustomerId),
    /// A vendor (purchase invoices).
    Vendor(VendorId),
}

/// One requested line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLineInput {
    /// Product sold or bought. May be absent or point at a deleted product.
    pub product_id: Option<ProductId>,
    /// Units on this line.
    pub quantity: i32,
    /// Unit price.
    pub price: Decimal,
}

/// A complete invoice creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Sale or purchase.
    pub invoice_type: InvoiceType,
    /// Customer for sale invoices.
    pub customer_id: Option<CustomerId>,
    /// Vendor for purchase invoices.
    pub vendor_id: Option<VendorId>,
    /// Invoice date; defaults to today when absent.
    pub date: Option<NaiveDate>,
    /// Invoice total.
    pub total_amount: Decimal,
    /// Amount already paid.
    pub paid_amount: Decimal,
    /// Line items in input order.
    pub items: Vec<InvoiceLineInput>,
}
