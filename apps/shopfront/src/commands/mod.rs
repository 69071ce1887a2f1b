//! # Commands Module
//!
//! Command-line front end over the [`Storefront`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (CLI definition + dispatch)
//! ├── catalog.rs  ◄─── products
//! └── cart.rs     ◄─── cart, add, increase, decrease, remove, clear,
//!                      checkout, reset
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ shopfront add 7                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Cli::parse() → Command::Add { id: 7 }                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add(&store, 7) ── Result<CountResponse, ApiError>     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  render(): text for humans, or JSON with --json                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::Storefront;
use shopfront_core::ProductId;

#[derive(Debug, Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Browse the catalog and manage the cart")]
pub struct Cli {
    /// Config file (default: shopfront.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Cart database file (overrides config and SHOPFRONT_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch the catalog and list products with their cart counts
    Products,
    /// Show cart lines and the total
    Cart,
    /// Add one unit of a product to the cart
    Add { id: ProductId },
    /// Add one more unit of a product already in the cart
    Increase { id: ProductId },
    /// Take one unit away; the product leaves the cart at zero
    Decrease { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
    /// Place the order and empty the cart
    Checkout,
    /// Delete the cart database
    Reset,
}

/// A command response that can be shown as text or JSON.
pub trait Render: Serialize {
    fn render_text(&self) -> String;
}

/// Runs one command against the store and returns what to print.
pub async fn execute(store: &Storefront, command: Command, json: bool) -> Result<String, ApiError> {
    match command {
        Command::Products => output(&catalog::products(store).await, json),
        Command::Cart => output(&cart::show(store).await, json),
        Command::Add { id } => output(&cart::add(store, id).await?, json),
        Command::Increase { id } => output(&cart::increase(store, id).await?, json),
        Command::Decrease { id } => output(&cart::decrease(store, id).await?, json),
        Command::Remove { id } => output(&cart::remove(store, id).await?, json),
        Command::Clear => output(&cart::clear(store).await?, json),
        Command::Checkout => output(&cart::checkout(store).await?, json),
        Command::Reset => output(&cart::reset(store).await?, json),
    }
}

fn output<R: Render>(response: &R, json: bool) -> Result<String, ApiError> {
    if json {
        serde_json::to_string_pretty(response)
            .map_err(|e| ApiError::internal(format!("Failed to serialize response: {e}")))
    } else {
        Ok(response.render_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["shopfront", "add", "7", "--db", "/tmp/c.db", "--json"]).unwrap();
        assert_eq!(cli.command, Command::Add { id: 7 });
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/c.db")));
        assert!(cli.json);
    }

    #[test]
    fn test_id_must_be_integer() {
        assert!(Cli::try_parse_from(["shopfront", "remove", "seven"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
