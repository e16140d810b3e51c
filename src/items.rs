//! Line items

use rusty_money::{Money, iso::Currency};

use crate::products::Product;

/// A product line in a cart, a snapshot of the product plus a quantity.
///
/// Line items copy the product fields at the time of adding, so later catalog
/// edits never change a cart already in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    id: String,
    title: String,
    category: String,
    description: String,
    price: Money<'static, Currency>,
    original_price: Money<'static, Currency>,
    quantity: u32,
}

impl LineItem {
    /// Creates a line item for one unit of the given product.
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self::with_quantity(product, 1)
    }

    /// Creates a line item for the given product and quantity.
    ///
    /// Callers pass a quantity of at least 1; carts never hold a zero-quantity
    /// line.
    #[must_use]
    pub fn with_quantity(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price,
            original_price: product.original_price,
            quantity,
        }
    }

    pub(crate) fn from_parts(
        id: String,
        title: String,
        category: String,
        description: String,
        price: Money<'static, Currency>,
        original_price: Money<'static, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            title,
            category,
            description,
            price,
            original_price,
            quantity,
        }
    }

    /// Returns the product identifier of the line item.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the title of the line item.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the category of the line item.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the description of the line item.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current unit price of the line item.
    #[must_use]
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Returns the pre-discount unit price of the line item.
    #[must_use]
    pub fn original_price(&self) -> &Money<'static, Currency> {
        &self.original_price
    }

    /// Returns the quantity of the line item.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the extended price of the line, `price × quantity`, in minor
    /// units. Saturates at the `i64` bounds.
    #[must_use]
    pub fn line_total_minor(&self) -> i64 {
        self.price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity))
    }

    /// Returns the extended savings of the line,
    /// `(original price − price) × quantity`, in minor units.
    ///
    /// Negative if the line somehow carries an original price below its
    /// current price; totals pass the value through unclamped.
    #[must_use]
    pub fn line_savings_minor(&self) -> i64 {
        self.original_price
            .to_minor_units()
            .saturating_sub(self.price.to_minor_units())
            .saturating_mul(i64::from(self.quantity))
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }
}
