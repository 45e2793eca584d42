//! Global ledger totals and the running balance derived from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::LedgerKind;

/// Sums over the income and expense tables at one point in time.
///
/// `balance()` is the value stamped as `previous_balance` on the next entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of every income amount.
    pub total_income: Decimal,
    /// Sum of every expense amount.
    pub total_expense: Decimal,
}

impl LedgerTotals {
    /// Creates totals from already-summed values.
    #[must_use]
    pub const fn new(total_income: Decimal, total_expense: Decimal) -> Self {
        Self {
            total_income,
            total_expense,
        }
    }

    /// Net balance: income minus expense.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }

    /// Folds one more entry into the totals.
    pub fn apply(&mut self, kind: LedgerKind, amount: Decimal) {
        match kind {
            LedgerKind::Income => self.total_income += amount,
            LedgerKind::Expense => self.total_expense += amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_ledger_has_zero_balance() {
        assert_eq!(LedgerTotals::default().balance(), Decimal::ZERO);
    }

    #[test]
    fn test_apply_sequence_from_worked_example() {
        // income 1000, expense 400; then expense 100 and income 50.
        let mut totals = LedgerTotals::new(dec!(1000), dec!(400));
        assert_eq!(totals.balance(), dec!(600));

        totals.apply(LedgerKind::Expense, dec!(100));
        assert_eq!(totals.balance(), dec!(500));

        totals.apply(LedgerKind::Income, dec!(50));
        assert_eq!(totals.balance(), dec!(550));
    }

    #[test]
    fn test_balance_may_go_negative() {
        let totals = LedgerTotals::new(dec!(10), dec!(25.75));
        assert_eq!(totals.balance(), dec!(-15.75));
    }
}
