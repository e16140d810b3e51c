//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, Cart},
    checkout::{BillingDetails, CheckoutError, OrderConfirmation, place_order},
    fixtures::{Catalog, FixtureError},
    items::LineItem,
    payment::{
        MockGateway, PaymentDeclined, PaymentGateway, PaymentId, PaymentRequest,
    },
    products::Product,
    storage::{FileStore, MemoryStore, StorageAdapter, StorageError},
    summary::{OrderSummary, SummaryError},
};
