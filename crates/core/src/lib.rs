//! Core business logic for Billbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Running balance over income and expense entries
//! - `invoicing` - Invoice validation, stock movement and outstanding amounts
//! - `dashboard` - Aggregate summary types
//! - `entity` - Master data rules
//! - `money` - Numeric column limits for money values

pub mod dashboard;
pub mod entity;
pub mod invoicing;
pub mod ledger;
pub mod money;
