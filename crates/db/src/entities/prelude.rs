//! Entity re-exports.

pub use super::bank_accounts::Entity as BankAccounts;
pub use super::customers::Entity as Customers;
pub use super::employees::Entity as Employees;
pub use super::expenses::Entity as Expenses;
pub use super::incomes::Entity as Incomes;
pub use super::invoice_items::Entity as InvoiceItems;
pub use super::invoices::Entity as Invoices;
pub use super::products::Entity as Products;
pub use super::vendors::Entity as Vendors;
