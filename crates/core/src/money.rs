//! Money column limits.
//!
//! Amounts are stored as `NUMERIC(12, 2)` and unit prices as `NUMERIC(10, 2)`.
//! Values are checked against those columns before any write so every
//! backend stores exactly what was accepted.

use rust_decimal::Decimal;

/// Decimal places kept for every money value.
pub const MONEY_SCALE: u32 = 2;

/// Total digits of an amount column (totals, balances, ledger amounts).
pub const AMOUNT_PRECISION: u32 = 12;

/// Total digits of a unit price column.
pub const PRICE_PRECISION: u32 = 10;

/// True when `value` has at most two decimal places and fits in a numeric
/// column of `precision` total digits.
#[must_use]
pub fn fits_column(value: Decimal, precision: u32) -> bool {
    if value.normalize().scale() > MONEY_SCALE {
        return false;
    }
    let integer_digits = precision.saturating_sub(MONEY_SCALE);
    let limit = Decimal::from(10_i64.pow(integer_digits));
    value.abs() < limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), AMOUNT_PRECISION, true)]
    #[case(dec!(10.05), AMOUNT_PRECISION, true)]
    #[case(dec!(10.500), AMOUNT_PRECISION, true)]
    #[case(dec!(10.005), AMOUNT_PRECISION, false)]
    #[case(dec!(9999999999.99), AMOUNT_PRECISION, true)]
    #[case(dec!(10000000000), AMOUNT_PRECISION, false)]
    #[case(dec!(-10000000000), AMOUNT_PRECISION, false)]
    #[case(dec!(99999999.99), PRICE_PRECISION, true)]
    #[case(dec!(100000000), PRICE_PRECISION, false)]
    fn test_fits_column(#[case] value: Decimal, #[case] precision: u32, #[case] expected: bool) {
        assert_eq!(fits_column(value, precision), expected);
    }
}
