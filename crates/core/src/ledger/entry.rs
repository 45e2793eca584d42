//! Ledger entry kinds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which of the two append-only ledger tables an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// Money received. Raises the balance.
    Income,
    /// Money paid out. Lowers the balance.
    Expense,
}

impl LedgerKind {
    /// Returns the amount with the sign it contributes to the balance.
    #[must_use]
    pub fn signed_amount(self, amount: Decimal) -> Decimal {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }

    /// Returns the lowercase name used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
