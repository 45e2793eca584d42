//! Invoicing and stock reconciliation rules.
//!
//! - Invoice types and the stock movement each one implies
//! - Validation of an invoice draft before anything is written
//! - Outstanding amounts per invoice and per party
//! - Share message for sending an invoice summary to its party

pub mod error;
pub mod outstanding;
pub mod service;
pub mod share;
pub mod stock;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::InvoiceError;
pub use outstanding::{outstanding, total_outstanding};
pub use service::InvoiceService;
pub use share::{ShareRecipient, share_message, share_url};
pub use stock::{StockMovement, stock_delta};
pub use types::{InvoiceDraft, InvoiceLineInput, InvoiceType, Party};
