//! Outstanding amounts.

use rust_decimal::Decimal;

/// Amount still owed on one invoice.
///
/// Negative when the invoice is overpaid; never clamped.
#[must_use]
pub fn outstanding(total_amount: Decimal, paid_amount: Decimal) -> Decimal {
    total_amount - paid_amount
}

/// Sum of outstanding amounts over `(total_amount, paid_amount)` pairs.
#[must_use]
pub fn total_outstanding<I>(invoices: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    invoices
        .into_iter()
        .map(|(total, paid)| outstanding(total, paid))
        .sum()
}
