//! Stored cart records

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::LineItem;

/// Errors raised while decoding a stored cart value.
#[derive(Debug, Error)]
pub enum StoredCartError {
    /// The stored value is not a well-formed record array.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A stored line carries a quantity of zero.
    #[error("stored line {0} has quantity zero")]
    ZeroQuantity(String),

    /// Two stored lines share the same product id.
    #[error("stored cart repeats item {0}")]
    DuplicateId(String),
}

/// One line of the stored cart array. Prices are minor units of the cart
/// currency; field names follow the storefront's JavaScript heritage.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLineItem {
    id: String,
    title: String,
    category: String,
    description: String,
    price: i64,
    original_price: i64,
    quantity: u32,
}

impl From<&LineItem> for StoredLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id().to_string(),
            title: item.title().to_string(),
            category: item.category().to_string(),
            description: item.description().to_string(),
            price: item.price().to_minor_units(),
            original_price: item.original_price().to_minor_units(),
            quantity: item.quantity(),
        }
    }
}

/// Encodes line items as the JSON array written to storage.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if encoding fails.
pub fn serialize(items: &[LineItem]) -> Result<String, serde_json::Error> {
    let records: Vec<StoredLineItem> = items.iter().map(StoredLineItem::from).collect();

    serde_json::to_string(&records)
}

/// Decodes a stored cart value back into line items in the given currency.
///
/// # Errors
///
/// - [`StoredCartError::Json`]: The value is not a well-formed record array.
/// - [`StoredCartError::ZeroQuantity`]: A stored line has quantity zero.
/// - [`StoredCartError::DuplicateId`]: Two stored lines share a product id.
pub fn deserialize(
    value: &str,
    currency: &'static Currency,
) -> Result<Vec<LineItem>, StoredCartError> {
    let records: Vec<StoredLineItem> = serde_json::from_str(value)?;

    let mut seen = FxHashSet::default();
    for record in &records {
        if record.quantity == 0 {
            return Err(StoredCartError::ZeroQuantity(record.id.clone()));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(StoredCartError::DuplicateId(record.id.clone()));
        }
    }

    let items = records
        .into_iter()
        .map(|record| {
            LineItem::from_parts(
                record.id,
                record.title,
                record.category,
                record.description,
                Money::from_minor(record.price, currency),
                Money::from_minor(record.original_price, currency),
                record.quantity,
            )
        })
        .collect();

    Ok(items)
}
