//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerTotals;

/// Row counts of the master and invoice tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    /// Number of vendors.
    pub vendors: u64,
    /// Number of customers.
    pub customers: u64,
    /// Number of employees.
    pub employees: u64,
    /// Number of invoices.
    pub invoices: u64,
}

/// Dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of vendors.
    pub total_vendors: u64,
    /// Number of customers.
    pub total_customers: u64,
    /// Number of employees.
    pub total_employees: u64,
    /// Sum of all income.
    pub total_income: Decimal,
    /// Sum of all expenses.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub net_balance: Decimal,
    /// Number of invoices.
    pub total_invoices: u64,
    /// Number of products at or below their stock alert.
    pub low_stock_products: u64,
}

impl DashboardSummary {
    /// Assembles the summary from its parts.
    #[must_use]
    pub fn new(counts: EntityCounts, totals: LedgerTotals, low_stock_products: u64) -> Self {
        Self {
            total_vendors: counts.vendors,
            total_customers: counts.customers,
            total_employees: counts.employees,
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            net_balance: totals.balance(),
            total_invoices: counts.invoices,
            low_stock_products,
        }
    }
}
