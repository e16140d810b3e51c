//! Order summary

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, items::LineItem, pricing, storage::StorageAdapter};

/// Errors that can occur when rendering an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Pre-checkout summary of a cart: per-line amounts plus the three totals.
///
/// The subtotal is what the lines would cost at their pre-discount prices,
/// the total is what the gateway will actually charge, and savings is the
/// difference between the two.
#[derive(Debug)]
pub struct OrderSummary<'a> {
    items: &'a [LineItem],

    /// Cost of all lines at their pre-discount prices.
    subtotal: Money<'static, Currency>,

    /// Difference between the subtotal and the total.
    savings: Money<'static, Currency>,

    /// Amount payable for the cart.
    total: Money<'static, Currency>,

    /// Indexes of lines priced below their pre-discount price.
    discounted_items: SmallVec<[usize; 10]>,

    currency: &'static Currency,
}

impl<'a> OrderSummary<'a> {
    /// Builds a summary of the cart's current lines.
    #[must_use]
    pub fn from_cart<S: StorageAdapter>(cart: &'a Cart<S>) -> Self {
        let items = cart.items();
        let currency = cart.currency();

        let discounted_items = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.line_savings_minor() > 0)
            .map(|(idx, _)| idx)
            .collect();

        Self {
            items,
            subtotal: pricing::subtotal(items, currency),
            savings: pricing::total_savings(items, currency),
            total: pricing::total_price(items, currency),
            discounted_items,
            currency,
        }
    }

    /// Cost of all lines at their pre-discount prices.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Difference between the subtotal and the total.
    #[must_use]
    pub fn savings(&self) -> Money<'static, Currency> {
        self.savings
    }

    /// Amount payable for the cart.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Indexes of lines priced below their pre-discount price.
    #[must_use]
    pub fn discounted_items(&self) -> &[usize] {
        &self.discounted_items
    }

    /// Calculates the savings as a fraction of the pre-discount subtotal.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        let savings_minor = self.savings.to_minor_units();
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Percentage::from(0.0);
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Percentage::from(savings_dec / subtotal_dec)
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Prints the summary to the console.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary cannot be printed.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let mut builder = Builder::default();
        let mut color_ops: SmallVec<[(usize, usize, Color); 32]> = smallvec![];

        push_summary_header(&mut builder);
        append_line_rows(self.items, self.currency, &mut builder, &mut color_ops);

        write_summary_table(&mut out, builder, self.items.len(), color_ops)?;
        write_summary_totals(&mut out, self)?;

        Ok(())
    }
}

fn push_summary_header(builder: &mut Builder) {
    builder.push_record([
        "",
        "Item",
        "Category",
        "Qty",
        "Base Price",
        "Price",
        "Savings",
    ]);
}

fn append_line_rows(
    items: &[LineItem],
    currency: &'static Currency,
    builder: &mut Builder,
    color_ops: &mut SmallVec<[(usize, usize, Color); 32]>,
) {
    for (idx, item) in items.iter().enumerate() {
        let row = idx + 1;
        let base = Money::from_minor(
            item.original_price()
                .to_minor_units()
                .saturating_mul(i64::from(item.quantity())),
            currency,
        );
        let total = Money::from_minor(item.line_total_minor(), currency);
        let savings_minor = item.line_savings_minor();

        let (price_cell, savings_cell) = if savings_minor > 0 {
            let points = percent_points(savings_minor, base.to_minor_units());
            let savings = Money::from_minor(savings_minor, currency);

            (format!("{total}"), format!("({points}%) -{savings}"))
        } else {
            (String::new(), String::new())
        };

        builder.push_record([
            format!("#{row:<3}"),
            item.title().to_string(),
            item.category().to_string(),
            format!("{}", item.quantity()),
            format!("{base}"),
            price_cell.clone(),
            savings_cell,
        ]);

        color_ops.push((row, 2, color_dark_grey()));

        if !price_cell.is_empty() {
            color_ops.push((row, 5, Color::FG_GREEN));
        }
    }
}

fn write_summary_table(
    out: &mut impl io::Write,
    builder: Builder,
    line_count: usize,
    color_ops: SmallVec<[(usize, usize, Color); 32]>,
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    for row in 2..=line_count {
        theme.insert_horizontal_line(row, separator);
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..7), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

fn write_summary_totals(
    out: &mut impl io::Write,
    summary: &OrderSummary<'_>,
) -> Result<(), SummaryError> {
    let savings_percent_points =
        percent_points_from_fractional_percentage(summary.savings_percent());

    let subtotal_val = format!("{}", summary.subtotal());
    let total_val = format!("{}", summary.total());
    let savings_val = format!("({savings_percent_points:.2}%) {}", summary.savings());

    let value_width = subtotal_val
        .len()
        .max(total_val.len())
        .max(savings_val.len());

    write_totals_line(out, "Subtotal:", &subtotal_val, value_width)?;
    write_totals_line(out, "Total:", &total_val, value_width)?;
    write_totals_line(out, "Savings:", &savings_val, value_width)?;

    writeln!(out).map_err(|_err| SummaryError::IO)
}

fn write_totals_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    value_width: usize,
) -> Result<(), SummaryError> {
    writeln!(out, " {label:<9} {value:>value_width$}").map_err(|_err| SummaryError::IO)
}

/// Converts a fractional percentage to percent points for display.
fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).round_dp(2)
}

/// Savings over a base amount as percent points, rounded for display.
fn percent_points(savings_minor: i64, base_minor: i64) -> Decimal {
    if base_minor == 0 {
        return Decimal::ZERO;
    }

    let savings = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
    let base = Decimal::from_i64(base_minor).unwrap_or(Decimal::ZERO);

    ((savings / base) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).round_dp(2)
}

fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
