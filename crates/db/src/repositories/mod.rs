//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod bank_account;
pub mod customer;
pub mod dashboard;
pub mod employee;
pub mod invoice;
pub mod ledger;
pub mod product;
pub mod store;
pub mod vendor;

pub use bank_account::{BankAccountInput, BankAccountRepository};
pub use customer::{CustomerInput, CustomerRepository};
pub use dashboard::{DashboardError, DashboardRepository};
pub use employee::{CreateEmployeeInput, EmployeeRepository, UpdateEmployeeInput};
pub use invoice::{
    InvoiceDetails, InvoiceFilter, InvoiceItemDetails, InvoiceRepoError, InvoiceRepository,
    PartyOutstanding, UpdateInvoiceAmounts,
};
pub use ledger::{LedgerEntry, LedgerRepoError, LedgerRepository, UpdateLedgerEntryInput};
pub use product::{CreateProductInput, ProductRepository, UpdateProductInput};
pub use store::StoreError;
pub use vendor::{VendorInput, VendorRepository};
