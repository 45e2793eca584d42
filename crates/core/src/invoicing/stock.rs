//! Stock movement implied by invoice lines.

use billbook_shared::types::ProductId;

use serde::{Deserialize, Serialize};

use super::types::InvoiceType;

/// Signed change to a product's quantity for one invoice line.
///
/// Sales take stock out, purchases bring it in. The result is not clamped:
/// stock may go negative for backorders.
#[must_use]
pub fn stock_delta(invoice_type: InvoiceType, quantity: i32) -> i32 {
    match invoice_type {
        InvoiceType::Sale => -quantity,
        InvoiceType::Purchase => quantity,
    }
}

/// A stock adjustment that was applied while creating an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Adjusted product.
    pub product_id: ProductId,
    /// Signed quantity change.
    pub delta: i32,
}

impl StockMovement {
    /// Movement for one resolved line.
    #[must_use]
    pub fn for_line(invoice_type: InvoiceType, product_id: ProductId, quantity: i32) -> Self {
        Self {
            product_id,
            delta: stock_delta(invoice_type, quantity),
        }
    }
}
