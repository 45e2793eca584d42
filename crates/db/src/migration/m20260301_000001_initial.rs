//! Initial schema: master data, ledger and invoices.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vendors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vendors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Vendors::VendorName).string_len(100).not_null())
                    .col(ColumnDef::new(Vendors::CompanyName).string_len(100).not_null())
                    .col(ColumnDef::new(Vendors::MobileNumber).string_len(15).not_null())
                    .col(ColumnDef::new(Vendors::City).string_len(50).not_null())
                    .col(created_at(Vendors::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Customers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Customers::CustomerName).string_len(100).not_null())
                    .col(ColumnDef::new(Customers::ShopName).string_len(100).null())
                    .col(ColumnDef::new(Customers::MobileNumber).string_len(15).not_null())
                    .col(ColumnDef::new(Customers::City).string_len(50).not_null())
                    .col(created_at(Customers::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employees::EmployeeName).string_len(100).not_null())
                    .col(ColumnDef::new(Employees::MobileNumber).string_len(15).not_null())
                    .col(ColumnDef::new(Employees::City).string_len(50).not_null())
                    .col(money(Employees::SalaryBalance).default(0))
                    .col(created_at(Employees::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::ProductName).string_len(100).not_null())
                    .col(ColumnDef::new(Products::CategoryName).string_len(50).not_null())
                    .col(price(Products::PurchasePrice))
                    .col(price(Products::SellPrice))
                    .col(
                        ColumnDef::new(Products::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::StockAlert)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(ColumnDef::new(Products::Weight).string_len(20).null())
                    .col(created_at(Products::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BankAccounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BankAccounts::AccountName).string_len(100).not_null())
                    .col(ColumnDef::new(BankAccounts::AccountNumber).string_len(50).not_null())
                    .col(ColumnDef::new(BankAccounts::BankName).string_len(100).not_null())
                    .col(ColumnDef::new(BankAccounts::IfscCode).string_len(20).not_null())
                    .col(money(BankAccounts::OpeningBalance).default(0))
                    .col(money(BankAccounts::InitialAmount).default(0))
                    .col(created_at(BankAccounts::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Incomes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Incomes::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Incomes::Date).date().not_null())
                    .col(money(Incomes::Amount).check(Expr::col(Incomes::Amount).gt(0)))
                    .col(money(Incomes::PreviousBalance))
                    .col(ColumnDef::new(Incomes::PaymentType).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Incomes::TransactionId)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(created_at(Incomes::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Expenses::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(money(Expenses::Amount).check(Expr::col(Expenses::Amount).gt(0)))
                    .col(money(Expenses::PreviousBalance))
                    .col(ColumnDef::new(Expenses::PaymentType).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Expenses::TransactionId)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Expenses::EmployeeId).uuid().null())
                    .col(created_at(Expenses::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expenses_employee")
                            .from(Expenses::Table, Expenses::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Invoices::InvoiceType)
                            .string_len(10)
                            .not_null()
                            .check(Expr::col(Invoices::InvoiceType).is_in(["SALE", "PURCHASE"])),
                    )
                    .col(ColumnDef::new(Invoices::CustomerId).uuid().null())
                    .col(ColumnDef::new(Invoices::VendorId).uuid().null())
                    .col(ColumnDef::new(Invoices::Date).date().not_null())
                    .col(money(Invoices::TotalAmount))
                    .col(money(Invoices::PaidAmount).default(0))
                    .col(created_at(Invoices::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_customer")
                            .from(Invoices::Table, Invoices::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_vendor")
                            .from(Invoices::Table, Invoices::VendorId)
                            .to(Vendors::Table, Vendors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InvoiceItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(InvoiceItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(InvoiceItems::InvoiceId).uuid().not_null())
                    .col(ColumnDef::new(InvoiceItems::ProductId).uuid().null())
                    .col(
                        ColumnDef::new(InvoiceItems::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(InvoiceItems::Quantity).gt(0)),
                    )
                    .col(price(InvoiceItems::Price))
                    .col(created_at(InvoiceItems::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_items_invoice")
                            .from(InvoiceItems::Table, InvoiceItems::InvoiceId)
                            .to(Invoices::Table, Invoices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_items_product")
                            .from(InvoiceItems::Table, InvoiceItems::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invoices_customer")
                    .table(Invoices::Table)
                    .col(Invoices::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invoices_vendor")
                    .table(Invoices::Table)
                    .col(Invoices::VendorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invoice_items_invoice")
                    .table(InvoiceItems::Table)
                    .col(InvoiceItems::InvoiceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_expenses_employee")
                    .table(Expenses::Table)
                    .col(Expenses::EmployeeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvoiceItems::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Incomes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vendors::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

/// `NUMERIC(12,2) NOT NULL`.
fn money<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).decimal_len(12, 2).not_null().to_owned()
}

/// `NUMERIC(10,2) NOT NULL`.
fn price<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).decimal_len(10, 2).not_null().to_owned()
}

fn created_at<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Vendors {
    Table,
    Id,
    VendorName,
    CompanyName,
    MobileNumber,
    City,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    CustomerName,
    ShopName,
    MobileNumber,
    City,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    EmployeeName,
    MobileNumber,
    City,
    SalaryBalance,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    ProductName,
    CategoryName,
    PurchasePrice,
    SellPrice,
    Quantity,
    StockAlert,
    Weight,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
    AccountName,
    AccountNumber,
    BankName,
    IfscCode,
    OpeningBalance,
    InitialAmount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Incomes {
    Table,
    Id,
    Name,
    Date,
    Amount,
    PreviousBalance,
    PaymentType,
    TransactionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Name,
    Date,
    Amount,
    PreviousBalance,
    PaymentType,
    TransactionId,
    EmployeeId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    InvoiceType,
    CustomerId,
    VendorId,
    Date,
    TotalAmount,
    PaidAmount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum InvoiceItems {
    Table,
    Id,
    InvoiceId,
    ProductId,
    Quantity,
    Price,
    CreatedAt,
}
