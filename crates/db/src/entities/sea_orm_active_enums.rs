//! Enums stored as constrained strings.

use billbook_core::invoicing::InvoiceType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice kind column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum InvoiceKind {
    /// Sale to a customer.
    #[sea_orm(string_value = "SALE")]
    Sale,
    /// Purchase from a vendor.
    #[sea_orm(string_value = "PURCHASE")]
    Purchase,
}

impl From<InvoiceType> for InvoiceKind {
    fn from(value: InvoiceType) -> Self {
        match value {
            InvoiceType::Sale => Self::Sale,
            InvoiceType::Purchase => Self::Purchase,
        }
    }
}

impl From<InvoiceKind> for InvoiceType {
    fn from(value: InvoiceKind) -> Self {
        match value {
            InvoiceKind::Sale => Self::Sale,
            InvoiceKind::Purchase => Self::Purchase,
        }
    }
}
