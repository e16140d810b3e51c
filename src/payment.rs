//! Payment gateway

use std::cell::{Cell, RefCell};
use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// A single charge request handed to a payment gateway.
///
/// The amount carries its currency; the remaining fields are free-form
/// presentation data for the payment processor's records.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Amount to charge, in the cart currency.
    pub amount: Money<'static, Currency>,

    /// Human-readable order description.
    pub description: String,

    /// Customer billing email.
    pub customer_email: String,

    /// Customer billing name.
    pub customer_name: String,
}

/// Opaque identifier a gateway assigns to a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentId(String);

impl PaymentId {
    /// Wraps a gateway-issued identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A payment the gateway refused, with the gateway's reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PaymentDeclined(pub String);

/// Boundary to an external payment processor.
///
/// One call, one charge attempt. Implementations either return the
/// processor's payment id or a decline with a reason; they never retry on
/// their own.
pub trait PaymentGateway {
    /// Attempts to charge the given request.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentDeclined`] if the processor refuses the charge.
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentId, PaymentDeclined>;
}

/// In-process gateway for tests and demos.
///
/// Approves every charge with sequential `PAY-` ids unless built with
/// [`MockGateway::declining`], and records each request it sees either way.
#[derive(Debug, Default)]
pub struct MockGateway {
    decline_with: Option<String>,
    charges: Cell<u64>,
    requests: RefCell<Vec<PaymentRequest>>,
}

impl MockGateway {
    /// Creates a gateway that approves every charge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that declines every charge with the given reason.
    #[must_use]
    pub fn declining(reason: impl Into<String>) -> Self {
        Self {
            decline_with: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Returns how many charge requests the gateway has seen.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Returns a copy of the most recent charge request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<PaymentRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl PaymentGateway for MockGateway {
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentId, PaymentDeclined> {
        self.requests.borrow_mut().push(request.clone());

        if let Some(reason) = &self.decline_with {
            return Err(PaymentDeclined(reason.clone()));
        }

        let n = self.charges.get().saturating_add(1);
        self.charges.set(n);

        Ok(PaymentId::new(format!("PAY-{n:06}")))
    }
}
