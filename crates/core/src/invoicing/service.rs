//! Invoice draft validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::money::{AMOUNT_PRECISION, PRICE_PRECISION, fits_column};

use super::error::InvoiceError;
use super::types::{InvoiceDraft, InvoiceType, Party};

/// Invoice service for validating drafts before persistence.
pub struct InvoiceService;

impl InvoiceService {
    /// Validates a draft and resolves its party.
    ///
    /// Checks, in order: amounts, items (non-empty, positive quantities,
    /// non-negative prices that fit the price column), then that the party matches the invoice type.
    /// Party existence is checked by the caller against the store.
    ///
    /// # Errors
    ///
    /// Returns the first rule the draft breaks.
    pub fn validate(draft: &InvoiceDraft) -> Result<Option<Party>, InvoiceError> {
        Self::validate_amount("total_amount", draft.total_amount)?;
        Self::validate_amount("paid_amount", draft.paid_amount)?;

        if draft.items.is_empty() {
            return Err(InvoiceError::NoItems);
        }
        for (line, item) in draft.items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(InvoiceError::NonPositiveQuantity {
                    line,
                    quantity: item.quantity,
                });
            }
            if item.price < Decimal::ZERO {
                return Err(InvoiceError::NegativePrice { line });
            }
            if !fits_column(item.price, PRICE_PRECISION) {
                return Err(InvoiceError::PriceOutOfRange { line });
            }
        }

        Self::resolve_party(draft)
    }

    /// Checks an invoice total or paid amount.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` below zero and `AmountOutOfRange` when the
    /// amount column cannot hold the value exactly.
    pub fn validate_amount(field: &'static str, amount: Decimal) -> Result<(), InvoiceError> {
        if amount < Decimal::ZERO {
            return Err(InvoiceError::NegativeAmount(field));
        }
        if !fits_column(amount, AMOUNT_PRECISION) {
            return Err(InvoiceError::AmountOutOfRange(field));
        }
        Ok(())
    }

    fn resolve_party(draft: &InvoiceDraft) -> Result<Option<Party>, InvoiceError> {
        match (draft.invoice_type, draft.customer_id, draft.vendor_id) {
            (_, None, None) => Ok(None),
            (InvoiceType::Sale, Some(customer_id), None) => Ok(Some(Party::Customer(customer_id))),
            (InvoiceType::Purchase, None, Some(vendor_id)) => Ok(Some(Party::Vendor(vendor_id))),
            (InvoiceType::Sale, _, Some(_)) => Err(InvoiceError::PartyMismatch {
                invoice_type: InvoiceType::Sale,
                party: "vendor",
            }),
            (InvoiceType::Purchase, Some(_), _) => Err(InvoiceError::PartyMismatch {
                invoice_type: InvoiceType::Purchase,
                party: "customer",
            }),
        }
    }

    /// The date an invoice is recorded under.
    #[must_use]
    pub fn invoice_date(draft: &InvoiceDraft, today: NaiveDate) -> NaiveDate {
        draft.date.unwrap_or(today)
    }
}
