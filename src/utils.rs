//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Number of catalog products to add to the cart
    #[clap(short, long)]
    pub n: Option<usize>,

    /// Fixture set to load the product catalog from
    #[clap(short, long, default_value = "consulting")]
    pub fixture: String,

    /// Directory the cart persists itself under between runs
    #[clap(short, long, default_value = "target/cart-store")]
    pub store_dir: PathBuf,

    /// Customer name for the payment
    #[clap(long, default_value = "Ada Lovelace")]
    pub name: String,

    /// Customer email for the payment
    #[clap(long, default_value = "ada@example.com")]
    pub email: String,

    /// Simulate a declined payment instead of a successful charge
    #[clap(long)]
    pub decline: bool,
}
