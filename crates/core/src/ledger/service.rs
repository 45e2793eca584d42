//! Ledger service for entry validation and balance stamping.
//!
//! Pure business logic with no database dependencies. The repository reads
//! the current totals, asks this service to stamp the new entry, and persists
//! the result inside a single serialised database transaction.

use rust_decimal::Decimal;

use super::balance::LedgerTotals;
use super::entry::LedgerKind;
use super::error::LedgerError;
use crate::money::{AMOUNT_PRECISION, fits_column};

use super::types::{NewLedgerEntry, SalaryPayment, StampedEntry, SALARY_PAYMENT_TYPE};

/// Ledger service for entry validation and balance stamping.
pub struct LedgerService;

impl LedgerService {
    /// Validates a new entry.
    ///
    /// # Errors
    ///
    /// - `MissingField` for a blank name or payment type
    /// - `NonPositiveAmount` for a zero or negative amount
    /// - `AmountOutOfRange` for an amount the amount column cannot hold exactly
    /// - `EmployeeOnIncome` when an income entry names an employee
    pub fn validate(entry: &NewLedgerEntry) -> Result<(), LedgerError> {
        if entry.name.trim().is_empty() {
            return Err(LedgerError::MissingField("name"));
        }
        if entry.payment_type.trim().is_empty() {
            return Err(LedgerError::MissingField("payment_type"));
        }
        if entry.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        if !fits_column(entry.amount, AMOUNT_PRECISION) {
            return Err(LedgerError::AmountOutOfRange);
        }
        if entry.kind == LedgerKind::Income && entry.employee_id.is_some() {
            return Err(LedgerError::EmployeeOnIncome);
        }
        Ok(())
    }

    /// Validates an entry and attaches the balance as of `totals`.
    ///
    /// `totals` must cover every row stored before this one and must not
    /// include the entry itself.
    ///
    /// # Errors
    ///
    /// Returns the validation error; nothing is stamped in that case.
    pub fn stamp(entry: NewLedgerEntry, totals: &LedgerTotals) -> Result<StampedEntry, LedgerError> {
        Self::validate(&entry)?;
        Ok(StampedEntry {
            entry,
            previous_balance: totals.balance(),
        })
    }

    /// Builds the expense entry recorded for a salary payment.
    #[must_use]
    pub fn salary_expense(employee_name: &str, payment: &SalaryPayment) -> NewLedgerEntry {
        NewLedgerEntry::expense(
            format!("Salary for {employee_name}"),
            payment.amount,
            SALARY_PAYMENT_TYPE,
        )
        .with_employee(payment.employee_id)
    }
}
