//! Catalog fixtures

use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use thiserror::Error;

use crate::products::Product;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Original price below the current price
    #[error("Product {0} has an original price below its current price")]
    InvalidDiscount(String),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    /// Map of product id -> product fixture
    products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
struct ProductFixture {
    /// Product title
    title: String,

    /// Product category
    category: String,

    /// Product description
    description: String,

    /// Product price (e.g., "299 USD")
    price: String,

    /// Pre-discount price; defaults to the current price when omitted
    original_price: Option<String>,
}

/// A validated product catalog loaded from a YAML fixture.
///
/// Loading rejects mixed currencies and products whose original price sits
/// below their current price, so everything handed to a cart is already
/// consistent.
#[derive(Debug, Default)]
pub struct Catalog {
    products: FxHashMap<String, Product>,
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Load the named fixture set from `./fixtures/{name}.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_path(PathBuf::from("./fixtures").join(format!("{name}.yml")))
    }

    /// Load a catalog fixture from the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog from YAML fixture contents.
    ///
    /// # Errors
    ///
    /// - [`FixtureError::Yaml`]: The contents are not a valid catalog document.
    /// - [`FixtureError::InvalidPrice`]: A price is not in "AMOUNT CURRENCY"
    ///   form, or its amount is negative.
    /// - [`FixtureError::UnknownCurrency`]: A price names an unsupported currency.
    /// - [`FixtureError::CurrencyMismatch`]: Products mix currencies.
    /// - [`FixtureError::InvalidDiscount`]: An original price sits below the
    ///   current price.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let mut catalog = Catalog::default();

        for (id, product_fixture) in fixture.products {
            let (price_minor, currency) = parse_price(&product_fixture.price)?;

            let original_minor = match &product_fixture.original_price {
                Some(original) => {
                    let (original_minor, original_currency) = parse_price(original)?;

                    if original_currency != currency {
                        return Err(FixtureError::CurrencyMismatch(
                            currency.iso_alpha_code.to_string(),
                            original_currency.iso_alpha_code.to_string(),
                        ));
                    }

                    original_minor
                }
                None => price_minor,
            };

            if original_minor < price_minor {
                return Err(FixtureError::InvalidDiscount(id));
            }

            if let Some(existing_currency) = catalog.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                catalog.currency = Some(currency);
            }

            let product = Product {
                id: id.clone(),
                title: product_fixture.title,
                category: product_fixture.category,
                description: product_fixture.description,
                price: Money::from_minor(price_minor, currency),
                original_price: Money::from_minor(original_minor, currency),
            };

            catalog.products.insert(id, product);
        }

        Ok(catalog)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// Iterate over the products in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency shared by every product, or `None` for an empty catalog.
    #[must_use]
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal or is negative, or if the
/// currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    if minor_units < 0 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected a non-negative amount, got: {s}"
        )));
    }

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
