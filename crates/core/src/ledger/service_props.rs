//! Property-based tests for LedgerService.
//!
//! - Previous balance equals the signed sum of all earlier entries
//! - Stamping never counts the entry being stamped

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::LedgerTotals;
use super::entry::LedgerKind;
use super::service::LedgerService;
use super::types::NewLedgerEntry;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn kind_strategy() -> impl Strategy<Value = LedgerKind> {
    prop_oneof![Just(LedgerKind::Income), Just(LedgerKind::Expense)]
}

fn make_entry(kind: LedgerKind, amount: Decimal) -> NewLedgerEntry {
    match kind {
        LedgerKind::Income => NewLedgerEntry::income("Sale", amount, "Cash"),
        LedgerKind::Expense => NewLedgerEntry::expense("Supplies", amount, "Cash"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any interleaving of insertions, the k-th stamp equals the signed
    /// sum of the amounts strictly before it.
    #[test]
    fn prop_stamp_equals_signed_prefix_sum(
        ops in prop::collection::vec((kind_strategy(), positive_amount()), 1..40),
    ) {
        let mut totals = LedgerTotals::default();

        for (k, (kind, amount)) in ops.iter().enumerate() {
            let stamped = LedgerService::stamp(make_entry(*kind, *amount), &totals).unwrap();

            let expected: Decimal = ops[..k]
                .iter()
                .map(|(kind, amount)| kind.signed_amount(*amount))
                .sum();
            prop_assert_eq!(stamped.previous_balance, expected);

            totals.apply(*kind, *amount);
        }
    }

    /// After all insertions, the net balance equals income minus expense.
    #[test]
    fn prop_final_balance_equals_income_minus_expense(
        ops in prop::collection::vec((kind_strategy(), positive_amount()), 0..40),
    ) {
        let mut totals = LedgerTotals::default();
        for (kind, amount) in &ops {
            totals.apply(*kind, *amount);
        }

        let income: Decimal = ops.iter().filter(|(k, _)| *k == LedgerKind::Income).map(|(_, a)| *a).sum();
        let expense: Decimal = ops.iter().filter(|(k, _)| *k == LedgerKind::Expense).map(|(_, a)| *a).sum();
        prop_assert_eq!(totals.balance(), income - expense);
    }

    /// Stamping does not depend on the entry's own amount.
    #[test]
    fn prop_stamp_excludes_own_amount(
        income in positive_amount(),
        expense in positive_amount(),
        amount_a in positive_amount(),
        amount_b in positive_amount(),
        kind in kind_strategy(),
    ) {
        let totals = LedgerTotals::new(income, expense);
        let a = LedgerService::stamp(make_entry(kind, amount_a), &totals).unwrap();
        let b = LedgerService::stamp(make_entry(kind, amount_b), &totals).unwrap();
        prop_assert_eq!(a.previous_balance, b.previous_balance);
        prop_assert_eq!(a.previous_balance, income - expense);
    }
}
