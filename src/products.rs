//! Products

use rusty_money::{Money, iso::Currency};

/// A catalog product that can be added to a cart.
///
/// `original_price` is the pre-discount unit price and is expected to be
/// greater than or equal to `price`; catalog loading enforces this, so a
/// `Product` built by hand is the caller's contract to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Stable product identifier, unique within a catalog.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Display category.
    pub category: String,

    /// Display description.
    pub description: String,

    /// Current unit price.
    pub price: Money<'static, Currency>,

    /// Pre-discount unit price, used only to compute savings.
    pub original_price: Money<'static, Currency>,
}
