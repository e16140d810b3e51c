//! Integration tests for the cart-to-checkout flow.
//!
//! The running example mirrors the storefront's discount display:
//!
//! - `audit` sells for $1.00, marked down from $1.50
//! - `workshop` sells for $0.50, never discounted
//!
//! Adding audit, workshop, audit yields quantities {audit: 2, workshop: 1},
//! a unit count of 3, a payable total of $2.50 (250 minor units) and
//! savings of $1.00 (100 minor units).

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use trolley::{
    cart::{CART_STORAGE_KEY, Cart},
    checkout::{BillingDetails, CheckoutError, place_order},
    fixtures::Catalog,
    payment::MockGateway,
    storage::{MemoryStore, StorageAdapter},
    summary::OrderSummary,
};

const CATALOG_YAML: &str = r#"
products:
  audit:
    title: AI Readiness Audit
    category: Assessment
    description: Two-week assessment
    price: "1.00 USD"
    original_price: "1.50 USD"
  workshop:
    title: AI Strategy Workshop
    category: Consulting
    description: Full-day session
    price: "0.50 USD"
"#;

fn catalog() -> Result<Catalog, trolley::fixtures::FixtureError> {
    Catalog::from_yaml(CATALOG_YAML)
}

fn billing() -> BillingDetails {
    BillingDetails {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    }
}

#[test]
fn running_example_totals() -> TestResult {
    let catalog = catalog()?;
    let audit = catalog.get("audit").ok_or("audit missing")?;
    let workshop = catalog.get("workshop").ok_or("workshop missing")?;

    let store = MemoryStore::new();
    let mut cart = Cart::new(USD, &store);
    cart.add_item(audit);
    cart.add_item(workshop);
    cart.add_item(audit);

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_item_count(), 3);
    assert_eq!(cart.total_price(), Money::from_minor(250, USD));
    assert_eq!(cart.total_savings(), Money::from_minor(100, USD));

    let order: Vec<(&str, u32)> = cart.iter().map(|item| (item.id(), item.quantity())).collect();
    assert_eq!(order, vec![("audit", 2), ("workshop", 1)]);

    Ok(())
}

#[test]
fn a_successful_checkout_charges_the_total_and_clears_everything() -> TestResult {
    let catalog = catalog()?;
    let audit = catalog.get("audit").ok_or("audit missing")?;
    let workshop = catalog.get("workshop").ok_or("workshop missing")?;

    let store = MemoryStore::new();
    let mut cart = Cart::new(USD, &store);
    cart.add_item(audit);
    cart.add_item(workshop);
    cart.add_item(audit);

    let gateway = MockGateway::new();
    let confirmation = place_order(&mut cart, &gateway, &billing())?;

    assert_eq!(confirmation.payment_id().as_str(), "PAY-000001");
    assert_eq!(*confirmation.amount_charged(), Money::from_minor(250, USD));
    assert!(cart.is_empty());
    assert_eq!(store.get(CART_STORAGE_KEY)?, None);

    assert_eq!(gateway.request_count(), 1);
    let request = gateway.last_request().ok_or("no request recorded")?;
    assert_eq!(request.amount, Money::from_minor(250, USD));
    assert_eq!(
        request.description,
        "2× AI Readiness Audit, 1× AI Strategy Workshop"
    );
    assert_eq!(request.customer_name, "Ada Lovelace");
    assert_eq!(request.customer_email, "ada@example.com");

    Ok(())
}

#[test]
fn a_declined_payment_preserves_the_cart_and_its_stored_state() -> TestResult {
    let catalog = catalog()?;
    let audit = catalog.get("audit").ok_or("audit missing")?;

    let store = MemoryStore::new();
    let mut cart = Cart::new(USD, &store);
    cart.add_item(audit);
    cart.add_item(audit);
    let stored_before = store.get(CART_STORAGE_KEY)?;

    let gateway = MockGateway::declining("insufficient funds");
    let result = place_order(&mut cart, &gateway, &billing());

    assert!(
        matches!(result, Err(CheckoutError::PaymentDeclined(_))),
        "expected a decline, got {result:?}"
    );
    assert_eq!(cart.total_item_count(), 2);
    assert_eq!(store.get(CART_STORAGE_KEY)?, stored_before);
    assert_eq!(gateway.request_count(), 1);

    Ok(())
}

#[test]
fn an_empty_cart_is_rejected_before_the_gateway_sees_it() {
    let store = MemoryStore::new();
    let mut cart = Cart::new(USD, &store);
    let gateway = MockGateway::new();

    let result = place_order(&mut cart, &gateway, &billing());

    assert!(
        matches!(result, Err(CheckoutError::EmptyCart)),
        "expected an empty-cart error, got {result:?}"
    );
    assert_eq!(gateway.request_count(), 0);
}

#[test]
fn a_checked_out_cart_leaves_nothing_for_the_next_session() -> TestResult {
    let catalog = catalog()?;
    let audit = catalog.get("audit").ok_or("audit missing")?;

    let store = MemoryStore::new();
    {
        let mut cart = Cart::new(USD, &store);
        cart.add_item(audit);
        place_order(&mut cart, &MockGateway::new(), &billing())?;
    }

    let next_session = Cart::new(USD, &store);

    assert!(next_session.is_empty());

    Ok(())
}

#[test]
fn retrying_after_a_decline_succeeds_with_the_same_cart() -> TestResult {
    let catalog = catalog()?;
    let audit = catalog.get("audit").ok_or("audit missing")?;

    let store = MemoryStore::new();
    let mut cart = Cart::new(USD, &store);
    cart.add_item(audit);

    let declining = MockGateway::declining("card expired");
    let result = place_order(&mut cart, &declining, &billing());
    assert!(result.is_err(), "expected the first attempt to fail");

    let approving = MockGateway::new();
    let confirmation = place_order(&mut cart, &approving, &billing())?;

    assert_eq!(*confirmation.amount_charged(), Money::from_minor(100, USD));
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn the_consulting_fixture_checks_out_end_to_end() -> TestResult {
    let catalog = Catalog::from_set("consulting")?;
    let currency = catalog.currency().ok_or("catalog has no products")?;

    let store = MemoryStore::new();
    let mut cart = Cart::new(currency, &store);

    let mut products: Vec<_> = catalog.iter().collect();
    products.sort_unstable_by(|a, b| a.id.cmp(&b.id));
    for product in &products {
        cart.add_item(product);
    }

    assert_eq!(cart.total_item_count(), 6);
    assert_eq!(cart.total_price(), Money::from_minor(1_669_800, currency));
    assert_eq!(cart.total_savings(), Money::from_minor(245_000, currency));

    let summary = OrderSummary::from_cart(&cart);
    assert_eq!(
        summary.subtotal().to_minor_units(),
        summary.total().to_minor_units() + summary.savings().to_minor_units()
    );

    let gateway = MockGateway::new();
    let confirmation = place_order(&mut cart, &gateway, &billing())?;

    assert_eq!(
        *confirmation.amount_charged(),
        Money::from_minor(1_669_800, currency)
    );
    assert!(cart.is_empty());

    Ok(())
}
