//! Ledger domain types for entry creation.

use billbook_shared::types::EmployeeId;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{AMOUNT_PRECISION, fits_column};

use super::entry::LedgerKind;
use super::error::LedgerError;

/// Payment type stamped on expenses created by a salary payment.
pub const SALARY_PAYMENT_TYPE: &str = "Salary";

/// Input for a new income or expense entry.
///
/// `previous_balance` is computed from the stored ledger, never taken from
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// Target ledger table.
    pub kind: LedgerKind,
    /// Source of income or reason for the expense.
    pub name: String,
    /// Entry amount (positive).
    pub amount: Decimal,
    /// Payment method, e.g. "Cash" or "Online".
    pub payment_type: String,
    /// External transaction reference.
    pub transaction_id: Option<String>,
    /// Linked employee (expenses only).
    pub employee_id: Option<EmployeeId>,
}

impl NewLedgerEntry {
    /// Creates an income entry.
    #[must_use]
    pub fn income(name: impl Into<String>, amount: Decimal, payment_type: impl Into<String>) -> Self {
        Self {
            kind: LedgerKind::Income,
            name: name.into(),
            amount,
            payment_type: payment_type.into(),
            transaction_id: None,
            employee_id: None,
        }
    }

    /// Creates an expense entry.
    #[must_use]
    pub fn expense(name: impl Into<String>, amount: Decimal, payment_type: impl Into<String>) -> Self {
        Self {
            kind: LedgerKind::Expense,
            ..Self::income(name, amount, payment_type)
        }
    }

    /// Sets the external transaction reference.
    #[must_use]
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Links the entry to an employee.
    #[must_use]
    pub fn with_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }
}

/// A validated entry carrying its previous-balance snapshot, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedEntry {
    /// The validated entry.
    pub entry: NewLedgerEntry,
    /// Balance immediately before this entry is applied.
    pub previous_balance: Decimal,
}

/// A salary payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryPayment {
    /// Employee being paid.
    pub employee_id: EmployeeId,
    /// Amount paid.
    pub amount: Decimal,
}

impl SalaryPayment {
    /// Builds a salary payment from optional request fields.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when either field is absent and
    /// `NonPositiveAmount` when the amount is zero or negative.
    /// Returns `AmountOutOfRange` when the amount column cannot hold it.
    pub fn from_parts(
        employee_id: Option<EmployeeId>,
        amount: Option<Decimal>,
    ) -> Result<Self, LedgerError> {
        let employee_id = employee_id.ok_or(LedgerError::MissingField("employee_id"))?;
        let amount = amount.ok_or(LedgerError::MissingField("amount"))?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        if !fits_column(amount, AMOUNT_PRECISION) {
            return Err(LedgerError::AmountOutOfRange);
        }
        Ok(Self {
            employee_id,
            amount,
        })
    }
}
