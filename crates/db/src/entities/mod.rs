//! `SeaORM` entity definitions.

pub mod prelude;

pub mod bank_accounts;
pub mod customers;
pub mod employees;
pub mod expenses;
pub mod incomes;
pub mod invoice_items;
pub mod invoices;
pub mod products;
pub mod sea_orm_active_enums;
pub mod vendors;
