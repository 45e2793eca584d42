//! Tests for invoicing rules.

use billbook_shared::types::{CustomerId, ProductId, VendorId};

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn line(quantity: i32, price: Decimal) -> InvoiceLineInput {
    InvoiceLineInput {
        product_id: Some(ProductId::new()),
        quantity,
        price,
    }
}

fn draft(invoice_type: InvoiceType, items: Vec<InvoiceLineInput>) -> InvoiceDraft {
    InvoiceDraft {
        invoice_type,
        customer_id: None,
        vendor_id: None,
        date: None,
        total_amount: dec!(100),
        paid_amount: dec!(40),
        items,
    }
}

// ============================================================================
// Stock movement
// ============================================================================

#[test]
fn test_sale_takes_stock_out_and_purchase_brings_it_in() {
    assert_eq!(stock_delta(InvoiceType::Sale, 3), -3);
    assert_eq!(stock_delta(InvoiceType::Purchase, 3), 3);

    let product_id = ProductId::new();
    let movement = StockMovement::for_line(InvoiceType::Sale, product_id, 7);
    assert_eq!(movement.product_id, product_id);
    assert_eq!(movement.delta, -7);
}

#[test]
fn test_invoice_type_parsing() {
    assert_eq!("SALE".parse::<InvoiceType>().unwrap(), InvoiceType::Sale);
    assert_eq!("purchase".parse::<InvoiceType>().unwrap(), InvoiceType::Purchase);
    assert!("REFUND".parse::<InvoiceType>().is_err());
    assert_eq!(
        serde_json::to_string(&InvoiceType::Purchase).unwrap(),
        "\"PURCHASE\""
    );
}

// ============================================================================
// Draft validation
// ============================================================================

#[test]
fn test_valid_draft_without_party() {
    let d = draft(InvoiceType::Sale, vec![line(2, dec!(10))]);
    assert_eq!(InvoiceService::validate(&d).unwrap(), None);
}

#[test]
fn test_party_resolution() {
    let customer_id = CustomerId::new();
    let mut d = draft(InvoiceType::Sale, vec![line(1, dec!(5))]);
    d.customer_id = Some(customer_id);
    assert_eq!(
        InvoiceService::validate(&d).unwrap(),
        Some(Party::Customer(customer_id))
    );

    let vendor_id = VendorId::new();
    let mut d = draft(InvoiceType::Purchase, vec![line(1, dec!(5))]);
    d.vendor_id = Some(vendor_id);
    assert_eq!(
        InvoiceService::validate(&d).unwrap(),
        Some(Party::Vendor(vendor_id))
    );
}

#[rstest]
#[case(InvoiceType::Sale, false, true)]
#[case(InvoiceType::Sale, true, true)]
#[case(InvoiceType::Purchase, true, false)]
#[case(InvoiceType::Purchase, true, true)]
fn test_party_mismatch(
    #[case] invoice_type: InvoiceType,
    #[case] with_customer: bool,
    #[case] with_vendor: bool,
) {
    let mut d = draft(invoice_type, vec![line(1, dec!(5))]);
    d.customer_id = with_customer.then(CustomerId::new);
    d.vendor_id = with_vendor.then(VendorId::new);

    let err = InvoiceService::validate(&d).unwrap_err();
    assert_eq!(err.error_code(), "PARTY_MISMATCH");
    assert_eq!(err.http_status_code(), 400);
}

#[test]
fn test_items_are_required() {
    let d = draft(InvoiceType::Sale, vec![]);
    assert!(matches!(
        InvoiceService::validate(&d),
        Err(InvoiceError::NoItems)
    ));
}

#[rstest]
#[case(0)]
#[case(-4)]
fn test_quantity_must_be_positive(#[case] quantity: i32) {
    let d = draft(
        InvoiceType::Purchase,
        vec![line(1, dec!(5)), line(quantity, dec!(5))],
    );
    match InvoiceService::validate(&d) {
        Err(InvoiceError::NonPositiveQuantity { line, quantity: q }) => {
            assert_eq!(line, 1);
            assert_eq!(q, quantity);
        }
        other => panic!("expected NonPositiveQuantity, got {other:?}"),
    }
}

#[test]
fn test_negative_values_are_rejected() {
    let d = draft(InvoiceType::Sale, vec![line(1, dec!(-1))]);
    assert!(matches!(
        InvoiceService::validate(&d),
        Err(InvoiceError::NegativePrice { line: 0 })
    ));

    let mut d = draft(InvoiceType::Sale, vec![line(1, dec!(1))]);
    d.paid_amount = dec!(-0.01);
    assert!(matches!(
        InvoiceService::validate(&d),
        Err(InvoiceError::NegativeAmount("paid_amount"))
    ));
}

#[rstest]
#[case(dec!(10.005), dec!(0), "total_amount")]
#[case(dec!(10000000000), dec!(0), "total_amount")]
#[case(dec!(100), dec!(10.005), "paid_amount")]
#[case(dec!(100), dec!(10000000000), "paid_amount")]
fn test_amounts_must_fit_money_column(
    #[case] total_amount: Decimal,
    #[case] paid_amount: Decimal,
    #[case] field: &str,
) {
    let mut d = draft(InvoiceType::Sale, vec![line(1, dec!(1))]);
    d.total_amount = total_amount;
    d.paid_amount = paid_amount;

    let err = InvoiceService::validate(&d).unwrap_err();
    assert!(matches!(err, InvoiceError::AmountOutOfRange(f) if f == field));
    assert_eq!(err.error_code(), "INVALID_AMOUNT");
    assert_eq!(err.http_status_code(), 400);
}

#[rstest]
#[case(dec!(10.005))]
#[case(dec!(100000000))]
fn test_price_must_fit_price_column(#[case] price: Decimal) {
    let d = draft(InvoiceType::Purchase, vec![line(1, dec!(1)), line(2, price)]);
    let err = InvoiceService::validate(&d).unwrap_err();
    assert!(matches!(err, InvoiceError::PriceOutOfRange { line: 1 }));
    assert_eq!(err.error_code(), "INVALID_PRICE");
}

#[test]
fn test_trailing_zeros_are_not_extra_precision() {
    let mut d = draft(InvoiceType::Sale, vec![line(1, dec!(10.5000))]);
    d.total_amount = dec!(10.500);
    assert!(InvoiceService::validate(&d).is_ok());
}

#[test]
fn test_overpayment_is_allowed() {
    let mut d = draft(InvoiceType::Sale, vec![line(1, dec!(1))]);
    d.paid_amount = dec!(250);
    assert!(InvoiceService::validate(&d).is_ok());
}

#[test]
fn test_invoice_date_defaults_to_today() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let mut d = draft(InvoiceType::Sale, vec![line(1, dec!(1))]);
    assert_eq!(InvoiceService::invoice_date(&d, today), today);

    let fixed = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    d.date = Some(fixed);
    assert_eq!(InvoiceService::invoice_date(&d, today), fixed);
}

// ============================================================================
// Outstanding amounts
// ============================================================================

#[test]
fn test_outstanding_examples() {
    assert_eq!(outstanding(dec!(500), dec!(200)), dec!(300));
    assert_eq!(outstanding(dec!(500), dec!(500)), Decimal::ZERO);
    assert_eq!(outstanding(dec!(500), dec!(650)), dec!(-150));
    assert_eq!(
        total_outstanding([(dec!(500), dec!(200)), (dec!(100), dec!(150))]),
        dec!(250)
    );
    assert_eq!(total_outstanding(std::iter::empty()), Decimal::ZERO);
}

// ============================================================================
// Share message
// ============================================================================

#[test]
fn test_share_message_text() {
    let date = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
    let message = share_message("Asha", "42", date, dec!(1500.00));
    assert_eq!(
        message,
        "Hello Asha,\nHere is your Invoice #42\nDate: 2026-02-14\nTotal Amount: 1500.00\nPlease pay at your earliest convenience."
    );
}

#[test]
fn test_share_url_encodes_text_and_keeps_mobile_verbatim() {
    let recipient = ShareRecipient {
        name: "Asha".to_string(),
        mobile: "9876543210".to_string(),
    };
    let url = share_url(&recipient, "Hello Asha,\nTotal: 1+1");

    assert_eq!(
        url,
        "https://wa.me/9876543210?text=Hello%20Asha%2C%0ATotal%3A%201%2B1"
    );
}

#[rstest]
#[case("a*b", "a%2Ab")]
#[case("~home/docs", "~home/docs")]
#[case("50% off!", "50%25%20off%21")]
#[case("r\u{e9}sum\u{e9}", "r%C3%A9sum%C3%A9")]
#[case("a-b.c_d", "a-b.c_d")]
fn test_share_text_encoding(#[case] message: &str, #[case] encoded: &str) {
    let url = share_url(&ShareRecipient::default(), message);
    assert_eq!(url, format!("https://wa.me/?text={encoded}"));
}

#[test]
fn test_share_url_without_recipient() {
    let url = share_url(&ShareRecipient::default(), "Hi");
    assert_eq!(url, "https://wa.me/?text=Hi");
}

// ============================================================================
// Properties
// ============================================================================

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Outstanding is total minus paid for any paid amount, never clamped.
    #[test]
    fn prop_outstanding_is_total_minus_paid(total in amount(), paid in amount()) {
        let value = outstanding(total, paid);
        prop_assert_eq!(value, total - paid);
        prop_assert_eq!(value < Decimal::ZERO, paid > total);
    }

    /// Party outstanding is the sum of per-invoice outstanding amounts.
    #[test]
    fn prop_total_outstanding_is_additive(
        invoices in prop::collection::vec((amount(), amount()), 0..20),
    ) {
        let expected: Decimal = invoices.iter().map(|(t, p)| *t - *p).sum();
        prop_assert_eq!(total_outstanding(invoices.clone()), expected);
    }

    /// A sale followed by a purchase of the same quantity restores stock.
    #[test]
    fn prop_sale_and_purchase_cancel(start in -1_000i32..1_000, quantity in 1i32..10_000) {
        let after_sale = start + stock_delta(InvoiceType::Sale, quantity);
        prop_assert_eq!(after_sale, start - quantity);
        let after_purchase = after_sale + stock_delta(InvoiceType::Purchase, quantity);
        prop_assert_eq!(after_purchase, start);
    }
}
