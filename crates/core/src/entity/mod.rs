//! Master data rules for vendors, customers, employees, products and bank accounts.
//!
//! Field-length checks live on the API request types; the rules here are the
//! ones that depend on values rather than shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::money::{AMOUNT_PRECISION, PRICE_PRECISION, fits_column};

/// Default low-stock threshold for new products.
pub const DEFAULT_STOCK_ALERT: i32 = 10;

/// Kinds of master-data records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Supplier.
    Vendor,
    /// Buyer.
    Customer,
    /// Staff member.
    Employee,
    /// Stock item.
    Product,
    /// Bank account.
    BankAccount,
}

impl EntityKind {
    /// Human readable name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vendor => "Vendor",
            Self::Customer => "Customer",
            Self::Employee => "Employee",
            Self::Product => "Product",
            Self::BankAccount => "Bank account",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors for master-data operations.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of record searched.
        kind: EntityKind,
        /// Missing ID.
        id: Uuid,
    },

    /// A field value breaks a rule.
    #[error("Invalid {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl EntityError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Invalid { .. } => "VALIDATION_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Invalid { .. } => 400,
        }
    }
}

const OUT_OF_RANGE: &str = "must have at most 2 decimal places and fit the column";

fn validate_money(field: &'static str, value: Decimal, precision: u32) -> Result<(), EntityError> {
    if value < Decimal::ZERO {
        return Err(EntityError::Invalid {
            field,
            reason: "cannot be negative",
        });
    }
    if !fits_column(value, precision) {
        return Err(EntityError::Invalid {
            field,
            reason: OUT_OF_RANGE,
        });
    }
    Ok(())
}

/// Validates product pricing and stock threshold.
///
/// # Errors
///
/// Returns `Invalid` for a negative price, a price the price column cannot
/// hold exactly, or a negative stock alert.
pub fn validate_product(
    purchase_price: Decimal,
    sell_price: Decimal,
    stock_alert: i32,
) -> Result<(), EntityError> {
    validate_money("purchase_price", purchase_price, PRICE_PRECISION)?;
    validate_money("sell_price", sell_price, PRICE_PRECISION)?;
    if stock_alert < 0 {
        return Err(EntityError::Invalid {
            field: "stock_alert",
            reason: "cannot be negative",
        });
    }
    Ok(())
}

/// Validates a stored balance such as an opening balance or salary balance.
/// Balances carry no sign rule.
///
/// # Errors
///
/// Returns `Invalid` when the amount column cannot hold the value exactly.
pub fn validate_balance(field: &'static str, value: Decimal) -> Result<(), EntityError> {
    if fits_column(value, AMOUNT_PRECISION) {
        Ok(())
    } else {
        Err(EntityError::Invalid {
            field,
            reason: OUT_OF_RANGE,
        })
    }
}

/// True when a product sits at or below its alert threshold.
#[must_use]
pub fn is_low_stock(quantity: i32, stock_alert: i32) -> bool {
    quantity <= stock_alert
}
