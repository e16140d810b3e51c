//! Storefront Checkout Example
//!
//! Adds products from a catalog fixture to a persistent cart, prints the
//! order summary, then places the order against a mock payment gateway.
//! The cart persists under `--store-dir` between runs, so a declined run
//! leaves everything in place for the next attempt.
//!
//! Use `-f` to load a catalog fixture by name
//! Use `-n` to limit the number of products added
//! Use `--decline` to simulate a declined payment

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use trolley::{
    cart::Cart,
    checkout::{BillingDetails, place_order},
    fixtures::Catalog,
    payment::MockGateway,
    storage::FileStore,
    summary::OrderSummary,
    utils::DemoCheckoutArgs,
};

/// Storefront Checkout Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let args = DemoCheckoutArgs::parse();

    let catalog = Catalog::from_set(&args.fixture)?;
    let currency = catalog.currency().context("catalog has no products")?;

    let store = FileStore::new(&args.store_dir);
    let mut cart = Cart::new(currency, store);

    if cart.is_empty() {
        let mut products: Vec<_> = catalog.iter().collect();
        products.sort_unstable_by(|a, b| a.id.cmp(&b.id));

        for product in products.iter().take(args.n.unwrap_or(products.len())) {
            cart.add_item(product);
        }
    } else {
        println!(
            "Resuming stored cart with {} items from {}",
            cart.total_item_count(),
            cart.storage().root().display()
        );
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let summary = OrderSummary::from_cart(&cart);
    summary.write_to(&mut handle)?;

    let gateway = if args.decline {
        MockGateway::declining("card declined by issuer")
    } else {
        MockGateway::new()
    };

    let billing = BillingDetails {
        name: args.name,
        email: args.email,
    };

    match place_order(&mut cart, &gateway, &billing) {
        Ok(confirmation) => writeln!(
            handle,
            " Paid {} (payment id {})",
            confirmation.amount_charged(),
            confirmation.payment_id()
        )?,
        Err(err) => writeln!(
            handle,
            " Checkout failed: {err}\n The cart is saved for another attempt."
        )?,
    }

    Ok(())
}
