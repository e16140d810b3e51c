//! Checkout

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::Cart,
    payment::{PaymentDeclined, PaymentGateway, PaymentId, PaymentRequest},
    storage::StorageAdapter,
};

/// Errors that can end a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart had no items, so there was nothing to charge.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The payment gateway refused the charge.
    #[error("payment declined: {0}")]
    PaymentDeclined(#[from] PaymentDeclined),
}

/// Billing identity for a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingDetails {
    /// Customer name as it should appear on the payment.
    pub name: String,

    /// Customer email for the payment receipt.
    pub email: String,
}

/// Proof of a completed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    payment_id: PaymentId,
    amount_charged: Money<'static, Currency>,
}

impl OrderConfirmation {
    /// Returns the gateway's identifier for the captured payment.
    #[must_use]
    pub fn payment_id(&self) -> &PaymentId {
        &self.payment_id
    }

    /// Returns the amount the gateway charged.
    #[must_use]
    pub fn amount_charged(&self) -> &Money<'static, Currency> {
        &self.amount_charged
    }
}

/// Places an order for the current cart contents.
///
/// Sends exactly one charge request for the cart total. On success the cart
/// is cleared, including its stored state, and the gateway's payment id
/// comes back in the confirmation. On decline the cart and its stored state
/// stay exactly as they were, ready for another attempt.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: The cart had no items; the gateway is
///   never contacted.
/// - [`CheckoutError::PaymentDeclined`]: The gateway refused the charge.
pub fn place_order<S: StorageAdapter, G: PaymentGateway>(
    cart: &mut Cart<S>,
    gateway: &G,
    billing: &BillingDetails,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let request = PaymentRequest {
        amount: cart.total_price(),
        description: order_description(cart),
        customer_email: billing.email.clone(),
        customer_name: billing.name.clone(),
    };

    let payment_id = gateway.charge(&request)?;
    cart.clear();

    info!(payment_id = %payment_id, "order placed");

    Ok(OrderConfirmation {
        payment_id,
        amount_charged: request.amount,
    })
}

fn order_description<S: StorageAdapter>(cart: &Cart<S>) -> String {
    cart.iter()
        .map(|item| format!("{}× {}", item.quantity(), item.title()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;
    use crate::{cart::CART_STORAGE_KEY, payment::MockGateway, products::Product, storage::MemoryStore};

    fn audit() -> Product {
        Product {
            id: "audit".to_string(),
            title: "AI Readiness Audit".to_string(),
            category: "Consulting".to_string(),
            description: "Two-week assessment".to_string(),
            price: Money::from_minor(100, USD),
            original_price: Money::from_minor(150, USD),
        }
    }

    fn workshop() -> Product {
        Product {
            id: "workshop".to_string(),
            title: "AI Strategy Workshop".to_string(),
            category: "Consulting".to_string(),
            description: "Full-day session".to_string(),
            price: Money::from_minor(50, USD),
            original_price: Money::from_minor(50, USD),
        }
    }

    fn billing() -> BillingDetails {
        BillingDetails {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn an_empty_cart_never_reaches_the_gateway() {
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
    fn a_successful_order_charges_once_and_clears_the_cart() -> TestResult {
        let store = MemoryStore::new();
        let mut cart = Cart::new(USD, &store);
        cart.add_item(&audit());
        cart.add_item(&workshop());
        cart.add_item(&audit());
        let gateway = MockGateway::new();

        let confirmation = place_order(&mut cart, &gateway, &billing())?;

        assert_eq!(confirmation.payment_id().as_str(), "PAY-000001");
        assert_eq!(*confirmation.amount_charged(), Money::from_minor(250, USD));
        assert!(cart.is_empty());
        assert_eq!(store.get(CART_STORAGE_KEY)?, None);
        assert_eq!(gateway.request_count(), 1);

        let request = gateway.last_request().ok_or("no request recorded")?;
        assert_eq!(request.amount, Money::from_minor(250, USD));
        assert_eq!(request.description, "2× AI Readiness Audit, 1× AI Strategy Workshop");
        assert_eq!(request.customer_email, "ada@example.com");
        assert_eq!(request.customer_name, "Ada Lovelace");

        Ok(())
    }

    #[test]
    fn a_declined_payment_leaves_the_cart_untouched() -> TestResult {
        let store = MemoryStore::new();
        let mut cart = Cart::new(USD, &store);
        cart.add_item(&audit());
        let stored_before = store.get(CART_STORAGE_KEY)?;
        let gateway = MockGateway::declining("insufficient funds");

        let result = place_order(&mut cart, &gateway, &billing());

        assert!(
            matches!(
                result,
                Err(CheckoutError::PaymentDeclined(PaymentDeclined(ref reason)))
                    if reason == "insufficient funds"
            ),
            "expected a decline, got {result:?}"
        );
        assert_eq!(cart.total_item_count(), 1);
        assert_eq!(store.get(CART_STORAGE_KEY)?, stored_before);
        assert_eq!(gateway.request_count(), 1);

        Ok(())
    }
}
