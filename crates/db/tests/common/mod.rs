//! Shared setup for repository tests: a fresh in-memory SQLite database
//! migrated with the real migrator.

#![allow(dead_code)]

use billbook_db::migration::{Migrator, MigratorTrait};
use billbook_db::repositories::{
    CreateEmployeeInput, CreateProductInput, CustomerInput, CustomerRepository,
    EmployeeRepository, ProductRepository, VendorInput, VendorRepository,
};
use billbook_db::entities::{customers, employees, products, vendors};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// One connection only: every pooled connection to `sqlite::memory:` would
/// otherwise open its own empty database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_vendor(db: &DatabaseConnection, name: &str) -> vendors::Model {
    VendorRepository::new(db.clone())
        .create(VendorInput {
            vendor_name: name.to_string(),
            company_name: format!("{name} Traders"),
            mobile_number: "9000000001".to_string(),
            city: "Pune".to_string(),
        })
        .await
        .expect("create vendor")
}

pub async fn create_customer(db: &DatabaseConnection, name: &str) -> customers::Model {
    CustomerRepository::new(db.clone())
        .create(CustomerInput {
            customer_name: name.to_string(),
            shop_name: None,
            mobile_number: "9876543210".to_string(),
            city: "Nagpur".to_string(),
        })
        .await
        .expect("create customer")
}

pub async fn create_employee(db: &DatabaseConnection, name: &str) -> employees::Model {
    EmployeeRepository::new(db.clone())
        .create(CreateEmployeeInput {
            employee_name: name.to_string(),
            mobile_number: "9000000002".to_string(),
            city: "Pune".to_string(),
            salary_balance: None,
        })
        .await
        .expect("create employee")
}

pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    quantity: i32,
    stock_alert: i32,
) -> products::Model {
    ProductRepository::new(db.clone())
        .create(CreateProductInput {
            product_name: name.to_string(),
            category_name: "General".to_string(),
            purchase_price: Decimal::from(80),
            sell_price: Decimal::from(100),
            quantity: Some(quantity),
            stock_alert: Some(stock_alert),
            weight: None,
        })
        .await
        .expect("create product")
}

pub async fn product_quantity(db: &DatabaseConnection, id: uuid::Uuid) -> i32 {
    ProductRepository::new(db.clone())
        .get(id)
        .await
        .expect("product exists")
        .quantity
}
