//! Cart

use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{items::LineItem, pricing, products::Product, storage::StorageAdapter};

mod records;

/// Storage key carts persist their line items under.
pub const CART_STORAGE_KEY: &str = "cart";

/// A shopping cart with write-through persistence.
///
/// The in-memory line items are the source of truth. Every mutation applies
/// to memory first and then persists the full cart to the storage adapter;
/// a failed write is logged and never rolls the mutation back, so a flaky
/// store degrades persistence without breaking the session.
///
/// All line items share the cart currency. Products added to the cart are
/// expected to be priced in that currency; catalogs enforce this at load
/// time.
#[derive(Debug)]
pub struct Cart<S: StorageAdapter> {
    items: Vec<LineItem>,
    currency: &'static Currency,
    storage: S,
}

impl<S: StorageAdapter> Cart<S> {
    /// Creates a cart over the given storage adapter and rehydrates it from
    /// any previously stored state.
    #[must_use]
    pub fn new(currency: &'static Currency, storage: S) -> Self {
        let mut cart = Cart {
            items: Vec::new(),
            currency,
            storage,
        };

        cart.rehydrate();
        cart
    }

    /// Adds one unit of the product to the cart.
    ///
    /// If a line with the product's id already exists its quantity goes up
    /// by one and the stored fields keep their original snapshot; otherwise
    /// a new line is appended at the end.
    pub fn add_item(&mut self, product: &Product) {
        debug_assert!(
            product.price.currency() == self.currency,
            "product {} priced in {}, cart keeps {}",
            product.id,
            product.price.currency().iso_alpha_code,
            self.currency.iso_alpha_code
        );

        if let Some(item) = self.items.iter_mut().find(|item| item.id() == product.id) {
            item.increment();
        } else {
            self.items.push(LineItem::new(product));
        }

        self.persist();
    }

    /// Removes the whole line for the given product id, regardless of its
    /// quantity. Removing an absent id leaves the cart and its stored state
    /// untouched.
    pub fn remove_item(&mut self, id: &str) {
        let Some(position) = self.items.iter().position(|item| item.id() == id) else {
            return;
        };

        self.items.remove(position);
        self.persist();
    }

    /// Sets the quantity of the line for the given product id.
    ///
    /// A quantity of zero removes the line entirely. Updating an absent id
    /// leaves the cart and its stored state untouched.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }

        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            return;
        };

        item.set_quantity(quantity);
        self.persist();
    }

    /// Empties the cart and removes the stored value, leaving the adapter
    /// without a cart key rather than with an empty array.
    pub fn clear(&mut self) {
        self.items.clear();

        if let Err(err) = self.storage.remove(CART_STORAGE_KEY) {
            warn!("failed to remove stored cart: {err}");
        }
    }

    /// Adopts previously stored line items, if the cart is still empty.
    ///
    /// A missing key, an unreadable store, or a value that fails decoding
    /// all degrade to keeping the cart as it is; nothing is written back
    /// during rehydration. A cart that already has items never adopts
    /// stored state.
    pub fn rehydrate(&mut self) {
        if !self.items.is_empty() {
            return;
        }

        let stored = match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return,
            Err(err) => {
                warn!("failed to read stored cart: {err}");
                return;
            }
        };

        match records::deserialize(&stored, self.currency) {
            Ok(items) => self.items = items,
            Err(err) => debug!("discarding stored cart: {err}"),
        }
    }

    /// Counts units across all lines, summing quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        pricing::item_count(&self.items)
    }

    /// Calculates the amount payable for the cart, `Σ price × quantity`.
    #[must_use]
    pub fn total_price(&self) -> Money<'static, Currency> {
        pricing::total_price(&self.items, self.currency)
    }

    /// Calculates the savings across the cart,
    /// `Σ (original price − price) × quantity`.
    #[must_use]
    pub fn total_savings(&self) -> Money<'static, Currency> {
        pricing::total_savings(&self.items, self.currency)
    }

    /// Returns the line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Returns the line item for the given product id, if present.
    #[must_use]
    pub fn get_item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Returns the storage adapter the cart persists through.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) {
        match records::serialize(&self.items) {
            Ok(json) => {
                if let Err(err) = self.storage.set(CART_STORAGE_KEY, &json) {
                    warn!("failed to persist cart: {err}");
                }
            }
            Err(err) => warn!("failed to encode cart for storage: {err}"),
        }
    }
}
