//! Invoice share message.
//!
//! Builds a plain-text invoice summary and a `wa.me` link that pre-fills it.
//! The mobile number is used verbatim, without country-code normalisation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Base URL of the chat share link.
pub const SHARE_BASE_URL: &str = "https://wa.me";

/// Bytes left as-is in the `text` parameter: alphanumerics, the RFC 3986
/// unreserved marks and `/`.
const TEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Who the invoice summary is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareRecipient {
    /// Display name of the customer or vendor.
    pub name: String,
    /// Mobile number as stored.
    pub mobile: String,
}

/// Formats the invoice summary text.
#[must_use]
pub fn share_message(
    recipient_name: &str,
    invoice_ref: &str,
    date: NaiveDate,
    total_amount: Decimal,
) -> String {
    format!(
        "Hello {recipient_name},\n\
         Here is your Invoice #{invoice_ref}\n\
         Date: {date}\n\
         Total Amount: {total_amount}\n\
         Please pay at your earliest convenience."
    )
}

/// Builds the share link for `message` addressed to `recipient`.
#[must_use]
pub fn share_url(recipient: &ShareRecipient, message: &str) -> String {
    let text = utf8_percent_encode(message, TEXT_ENCODE_SET);
    format!("{SHARE_BASE_URL}/{}?text={text}", recipient.mobile)
}
