//! Single running-balance ledger over income and expense entries.
//!
//! This module implements the ledger rules:
//! - Entry kinds (income, expense) and their signed effect on the balance
//! - Global totals and the previous-balance snapshot stamped on new entries
//! - Validation of new entries before persistence
//! - Salary payments synthesised as expense entries
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use balance::LedgerTotals;
pub use entry::LedgerKind;
pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{NewLedgerEntry, SalaryPayment, StampedEntry, SALARY_PAYMENT_TYPE};
