//! # Shopfront Entry Point
//!
//! ```text
//! $ shopfront products          # fetch + list the catalog
//! $ shopfront add 7             # put product 7 in the cart
//! $ shopfront cart              # priced cart lines and total
//! $ shopfront checkout          # "Order placed", cart emptied
//! ```
//!
//! The actual setup is in lib.rs for testability.

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = shopfront::commands::Cli::parse();
    shopfront::run(cli).await
}
