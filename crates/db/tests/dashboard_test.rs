//! Integration tests for the dashboard and master-data repositories.

mod common;

use billbook_core::entity::{EntityError, EntityKind};
use billbook_core::ledger::NewLedgerEntry;
use billbook_db::repositories::{
    BankAccountInput, BankAccountRepository, DashboardRepository, LedgerRepository,
    ProductRepository, StoreError, UpdateProductInput, VendorInput, VendorRepository,
};
use billbook_shared::types::PageRequest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{create_customer, create_employee, create_product, create_vendor, setup_db};

#[tokio::test]
async fn test_dashboard_summary() {
    let db = setup_db().await;
    create_vendor(&db, "Kumar").await;
    create_customer(&db, "Asha").await;
    create_customer(&db, "Bina").await;
    create_employee(&db, "Ravi").await;
    create_product(&db, "Below", 9, 10).await;
    create_product(&db, "Boundary", 10, 10).await;
    create_product(&db, "Above", 11, 10).await;

    let ledger = LedgerRepository::new(db.clone());
    ledger
        .record(NewLedgerEntry::income("Sales", dec!(1000), "Cash"))
        .await
        .unwrap();
    ledger
        .record(NewLedgerEntry::expense("Rent", dec!(400), "Cash"))
        .await
        .unwrap();

    let summary = DashboardRepository::new(db).summary().await.unwrap();
    assert_eq!(summary.total_vendors, 1);
    assert_eq!(summary.total_customers, 2);
    assert_eq!(summary.total_employees, 1);
    assert_eq!(summary.total_invoices, 0);
    assert_eq!(summary.total_income, dec!(1000));
    assert_eq!(summary.total_expense, dec!(400));
    assert_eq!(summary.net_balance, dec!(600));
    assert_eq!(summary.low_stock_products, 2);
}

#[tokio::test]
async fn test_empty_dashboard() {
    let db = setup_db().await;
    let summary = DashboardRepository::new(db).summary().await.unwrap();
    assert_eq!(summary.net_balance, Decimal::ZERO);
    assert_eq!(summary.low_stock_products, 0);
}

#[tokio::test]
async fn test_low_stock_is_boundary_inclusive() {
    let db = setup_db().await;
    create_product(&db, "Below", 9, 10).await;
    create_product(&db, "Boundary", 10, 10).await;
    create_product(&db, "Above", 11, 10).await;
    create_product(&db, "Backordered", -2, 0).await;

    let low = ProductRepository::new(db).low_stock().await.unwrap();
    let mut names: Vec<_> = low.into_iter().map(|p| p.product_name).collect();
    names.sort();
    assert_eq!(names, vec!["Backordered", "Below", "Boundary"]);
}

#[tokio::test]
async fn test_product_update_keeps_quantity() {
    let db = setup_db().await;
    let product = create_product(&db, "Pen", 25, 10).await;
    let repo = ProductRepository::new(db);

    let updated = repo
        .update(
            product.id,
            UpdateProductInput {
                product_name: "Gel pen".to_string(),
                category_name: "Stationery".to_string(),
                purchase_price: dec!(8),
                sell_price: dec!(12),
                stock_alert: 30,
                weight: Some("10g".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.product_name, "Gel pen");
    assert_eq!(updated.stock_alert, 30);
    assert_eq!(updated.quantity, 25);
}

#[tokio::test]
async fn test_product_rules_are_checked() {
    let db = setup_db().await;
    let repo = ProductRepository::new(db);

    let err = repo
        .create(billbook_db::repositories::CreateProductInput {
            product_name: "Pen".to_string(),
            category_name: "General".to_string(),
            purchase_price: dec!(-1),
            sell_price: dec!(10),
            quantity: None,
            stock_alert: None,
            weight: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Entity(EntityError::Invalid {
            field: "purchase_price",
            ..
        })
    ));

    let err = repo
        .create(billbook_db::repositories::CreateProductInput {
            product_name: "Pen".to_string(),
            category_name: "General".to_string(),
            purchase_price: dec!(5),
            sell_price: dec!(10.005),
            quantity: None,
            stock_alert: None,
            weight: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Entity(EntityError::Invalid {
            field: "sell_price",
            ..
        })
    ));
}

#[tokio::test]
async fn test_product_defaults() {
    let db = setup_db().await;
    let product = ProductRepository::new(db)
        .create(billbook_db::repositories::CreateProductInput {
            product_name: "Pen".to_string(),
            category_name: "General".to_string(),
            purchase_price: dec!(5),
            sell_price: dec!(10),
            quantity: None,
            stock_alert: None,
            weight: None,
        })
        .await
        .unwrap();

    assert_eq!(product.quantity, 0);
    assert_eq!(product.stock_alert, 10);
}

#[tokio::test]
async fn test_vendor_crud() {
    let db = setup_db().await;
    let repo = VendorRepository::new(db.clone());
    let vendor = create_vendor(&db, "Kumar").await;

    let updated = repo
        .update(
            vendor.id,
            VendorInput {
                vendor_name: "Kumar".to_string(),
                company_name: "Kumar & Sons".to_string(),
                mobile_number: "9000000009".to_string(),
                city: "Mumbai".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.company_name, "Kumar & Sons");

    let page = repo.list(&PageRequest::default()).await.unwrap();
    assert_eq!(page.meta.total, 1);

    repo.delete(vendor.id).await.unwrap();
    let err = repo.get(vendor.id).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Entity(EntityError::NotFound {
            kind: EntityKind::Vendor,
            ..
        })
    ));
}

#[tokio::test]
async fn test_bank_account_crud() {
    let db = setup_db().await;
    let repo = BankAccountRepository::new(db);

    let account = repo
        .create(BankAccountInput {
            account_name: "Shop current".to_string(),
            account_number: "001234567890".to_string(),
            bank_name: "State Bank".to_string(),
            ifsc_code: "SBIN0000001".to_string(),
            opening_balance: dec!(5000),
            initial_amount: dec!(5000),
        })
        .await
        .unwrap();
    assert_eq!(repo.get(account.id).await.unwrap().opening_balance, dec!(5000));

    let err = repo
        .create(BankAccountInput {
            account_name: "Overflow".to_string(),
            account_number: "001234567891".to_string(),
            bank_name: "State Bank".to_string(),
            ifsc_code: "SBIN0000001".to_string(),
            opening_balance: dec!(10000000000),
            initial_amount: dec!(0),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Entity(EntityError::Invalid {
            field: "opening_balance",
            ..
        })
    ));

    repo.delete(account.id).await.unwrap();
    let err = repo.delete(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Entity(EntityError::NotFound {
            kind: EntityKind::BankAccount,
            ..
        })
    ));
}
