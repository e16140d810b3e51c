//! Pricing

use rusty_money::{Money, iso::Currency};

use crate::items::LineItem;

/// Calculates the number of units across all lines, summing quantities.
#[must_use]
pub fn item_count(items: &[LineItem]) -> u64 {
    items
        .iter()
        .fold(0_u64, |acc, item| acc.saturating_add(u64::from(item.quantity())))
}

/// Calculates the total price of a list of line items,
/// `Σ price × quantity`.
///
/// An empty list totals zero in the given currency. Sums saturate at the
/// `i64` minor-unit bounds rather than wrapping.
#[must_use]
pub fn total_price(items: &[LineItem], currency: &'static Currency) -> Money<'static, Currency> {
    let total = items
        .iter()
        .fold(0_i64, |acc, item| acc.saturating_add(item.line_total_minor()));

    Money::from_minor(total, currency)
}

/// Calculates the total savings of a list of line items,
/// `Σ (original price − price) × quantity`.
#[must_use]
pub fn total_savings(items: &[LineItem], currency: &'static Currency) -> Money<'static, Currency> {
    let savings = items
        .iter()
        .fold(0_i64, |acc, item| acc.saturating_add(item.line_savings_minor()));

    Money::from_minor(savings, currency)
}

/// Calculates the pre-discount subtotal of a list of line items,
/// `Σ original price × quantity`.
#[must_use]
pub fn subtotal(items: &[LineItem], currency: &'static Currency) -> Money<'static, Currency> {
    let subtotal = items.iter().fold(0_i64, |acc, item| {
        let line = item
            .original_price()
            .to_minor_units()
            .saturating_mul(i64::from(item.quantity()));

        acc.saturating_add(line)
    });

    Money::from_minor(subtotal, currency)
}
