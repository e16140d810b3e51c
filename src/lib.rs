//! Trolley
//!
//! Trolley is a storage-backed shopping cart and checkout engine for single-session storefronts.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod items;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod summary;
pub mod utils;
