//! Demo data seeder for Billbook development.
//!
//! Seeds a vendor, a customer, an employee, a few products, opening ledger
//! entries and one invoice of each type. Does nothing when vendors already
//! exist.
//!
//! Usage: cargo run --bin seeder

use billbook_core::invoicing::{InvoiceDraft, InvoiceLineInput, InvoiceType};
use billbook_core::ledger::{NewLedgerEntry, SalaryPayment};
use billbook_db::entities::vendors;
use billbook_db::repositories::{
    BankAccountInput, BankAccountRepository, CreateEmployeeInput, CreateProductInput,
    CustomerInput, CustomerRepository, EmployeeRepository, InvoiceRepository, LedgerRepository,
    ProductRepository, VendorInput, VendorRepository,
};
use billbook_shared::types::{CustomerId, EmployeeId, ProductId, VendorId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")?;

    println!("Connecting to database...");
    let db = billbook_db::connect(&database_url).await?;

    if vendors::Entity::find().count(&db).await? > 0 {
        println!("Data already present, skipping.");
        return Ok(());
    }

    println!("Seeding parties...");
    let (vendor_id, customer_id, employee_id) = seed_parties(&db).await?;

    println!("Seeding products...");
    let products = seed_products(&db).await?;

    println!("Seeding bank account...");
    BankAccountRepository::new(db.clone())
        .create(BankAccountInput {
            account_name: "Shop current account".to_string(),
            account_number: "000123456789".to_string(),
            bank_name: "State Bank".to_string(),
            ifsc_code: "SBIN0000123".to_string(),
            opening_balance: dec!(25000),
            initial_amount: dec!(25000),
        })
        .await?;

    println!("Seeding ledger...");
    seed_ledger(&db, employee_id).await?;

    println!("Seeding invoices...");
    seed_invoices(&db, vendor_id, customer_id, &products).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_parties(
    db: &DatabaseConnection,
) -> anyhow::Result<(VendorId, CustomerId, EmployeeId)> {
    let vendor = VendorRepository::new(db.clone())
        .create(VendorInput {
            vendor_name: "Ravi Kumar".to_string(),
            company_name: "Kumar Wholesale".to_string(),
            mobile_number: "919800000001".to_string(),
            city: "Pune".to_string(),
        })
        .await?;

    let customer = CustomerRepository::new(db.clone())
        .create(CustomerInput {
            customer_name: "Asha Patil".to_string(),
            shop_name: Some("Asha General Store".to_string()),
            mobile_number: "919800000002".to_string(),
            city: "Pune".to_string(),
        })
        .await?;

    let employee = EmployeeRepository::new(db.clone())
        .create(CreateEmployeeInput {
            employee_name: "Meena Shah".to_string(),
            mobile_number: "919800000003".to_string(),
            city: "Pune".to_string(),
            salary_balance: None,
        })
        .await?;

    Ok((
        VendorId::from_uuid(vendor.id),
        CustomerId::from_uuid(customer.id),
        EmployeeId::from_uuid(employee.id),
    ))
}

async fn seed_products(db: &DatabaseConnection) -> anyhow::Result<Vec<ProductId>> {
    let repo = ProductRepository::new(db.clone());
    let catalogue: [(&str, &str, Decimal, Decimal, i32, Option<&str>); 3] = [
        ("Basmati Rice", "Grocery", dec!(60), dec!(75), 40, Some("1kg")),
        ("Sunflower Oil", "Grocery", dec!(120), dec!(140), 12, Some("1L")),
        ("Notebook", "Stationery", dec!(25), dec!(40), 5, None),
    ];

    let mut ids = Vec::with_capacity(catalogue.len());
    for (name, category, purchase_price, sell_price, quantity, weight) in catalogue {
        let product = repo
            .create(CreateProductInput {
                product_name: name.to_string(),
                category_name: category.to_string(),
                purchase_price,
                sell_price,
                quantity: Some(quantity),
                stock_alert: None,
                weight: weight.map(str::to_string),
            })
            .await?;
        ids.push(ProductId::from_uuid(product.id));
    }
    Ok(ids)
}

async fn seed_ledger(db: &DatabaseConnection, employee_id: EmployeeId) -> anyhow::Result<()> {
    let repo = LedgerRepository::new(db.clone());
    repo.record(NewLedgerEntry::income("Opening capital", dec!(50000), "Bank"))
        .await?;
    repo.record(
        NewLedgerEntry::expense("Shop rent", dec!(8000), "Online").with_transaction_id("RENT-0001"),
    )
    .await?;
    repo.pay_salary(SalaryPayment::from_parts(Some(employee_id), Some(dec!(12000)))?)
        .await?;
    Ok(())
}

async fn seed_invoices(
    db: &DatabaseConnection,
    vendor_id: VendorId,
    customer_id: CustomerId,
    products: &[ProductId],
) -> anyhow::Result<()> {
    let repo = InvoiceRepository::new(db.clone());
    let line = |index: usize, quantity: i32, price: Decimal| InvoiceLineInput {
        product_id: products.get(index).copied(),
        quantity,
        price,
    };

    repo.create(InvoiceDraft {
        invoice_type: InvoiceType::Purchase,
        customer_id: None,
        vendor_id: Some(vendor_id),
        date: None,
        total_amount: dec!(3000),
        paid_amount: dec!(3000),
        items: vec![line(0, 20, dec!(60)), line(1, 15, dec!(120))],
    })
    .await?;

    repo.create(InvoiceDraft {
        invoice_type: InvoiceType::Sale,
        customer_id: Some(customer_id),
        vendor_id: None,
        date: None,
        total_amount: dec!(1030),
        paid_amount: dec!(500),
        items: vec![line(0, 10, dec!(75)), line(1, 2, dec!(140))],
    })
    .await?;

    Ok(())
}
