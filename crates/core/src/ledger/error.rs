//! Ledger error types.

use thiserror::Error;
use uuid::Uuid;

use super::entry::LedgerKind;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A required field is absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Entry amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Amount has more than two decimal places or exceeds the column range.
    #[error("Amount must have at most 2 decimal places and be below 10,000,000,000")]
    AmountOutOfRange,

    /// Only expenses may be linked to an employee.
    #[error("Income entries cannot reference an employee")]
    EmployeeOnIncome,

    // ========== Lookup Errors ==========
    /// Referenced employee does not exist.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(Uuid),

    /// Ledger entry does not exist.
    #[error("{kind} entry not found: {id}")]
    EntryNotFound {
        /// Which ledger table was searched.
        kind: LedgerKind,
        /// The missing entry ID.
        id: Uuid,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::AmountOutOfRange => "INVALID_AMOUNT",
            Self::EmployeeOnIncome => "EMPLOYEE_ON_INCOME",
            Self::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            Self::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::MissingField(_)
            | Self::NonPositiveAmount
            | Self::AmountOutOfRange
            | Self::EmployeeOnIncome => 400,
            Self::EmployeeNotFound(_) | Self::EntryNotFound { .. } => 404,
        }
    }
}
