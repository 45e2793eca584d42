//! Invoice error types.

use thiserror::Error;
use uuid::Uuid;

use super::types::InvoiceType;

/// Errors that can occur during invoice operations.
#[derive(Debug, Error)]
pub enum InvoiceError {
    // ========== Validation Errors ==========
    /// An invoice needs at least one line item.
    #[error("Invoice must have at least one item")]
    NoItems,

    /// Line quantity must be a positive integer.
    #[error("Item {line}: quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// Zero-based index of the offending line.
        line: usize,
        /// The rejected quantity.
        quantity: i32,
    },

    /// Line price cannot be negative.
    #[error("Item {line}: price cannot be negative")]
    NegativePrice {
        /// Zero-based index of the offending line.
        line: usize,
    },

    /// Line price has more than two decimal places or exceeds the column range.
    #[error("Item {line}: price must have at most 2 decimal places and be below 100,000,000")]
    PriceOutOfRange {
        /// Zero-based index of the offending line.
        line: usize,
    },

    /// An invoice amount cannot be negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// An invoice amount has more than two decimal places or exceeds the column range.
    #[error("{0} must have at most 2 decimal places and be below 10,000,000,000")]
    AmountOutOfRange(&'static str),

    /// The party does not fit the invoice type.
    #[error("A {invoice_type} invoice cannot reference a {party}")]
    PartyMismatch {
        /// Requested invoice type.
        invoice_type: InvoiceType,
        /// Kind of party supplied.
        party: &'static str,
    },

    // ========== Lookup Errors ==========
    /// Referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    /// Referenced vendor does not exist.
    #[error("Vendor not found: {0}")]
    VendorNotFound(Uuid),

    /// Invoice does not exist.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),
}

impl InvoiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoItems => "NO_ITEMS",
            Self::NonPositiveQuantity { .. } => "NON_POSITIVE_QUANTITY",
            Self::NegativePrice { .. } => "NEGATIVE_PRICE",
            Self::PriceOutOfRange { .. } => "INVALID_PRICE",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::AmountOutOfRange(_) => "INVALID_AMOUNT",
            Self::PartyMismatch { .. } => "PARTY_MISMATCH",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::VendorNotFound(_) => "VENDOR_NOT_FOUND",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NoItems
            | Self::NonPositiveQuantity { .. }
            | Self::NegativePrice { .. }
            | Self::PriceOutOfRange { .. }
            | Self::NegativeAmount(_)
            | Self::AmountOutOfRange(_)
            | Self::PartyMismatch { .. } => 400,
            Self::CustomerNotFound(_) | Self::VendorNotFound(_) | Self::InvoiceNotFound(_) => 404,
        }
    }
}
