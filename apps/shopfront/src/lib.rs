//! # Shopfront Library
//!
//! Store state and the command-line front end for Shopfront.
//!
//! ## Module Organization
//! ```text
//! shopfront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── Storefront (the store facade)
//! │   ├── catalog.rs  ◄─── Product list mirror + fetch tickets
//! │   ├── cart.rs     ◄─── Cart mirror over the checkout table
//! │   └── notice.rs   ◄─── Error notices for the UI
//! ├── commands/
//! │   ├── mod.rs      ◄─── CLI definition + dispatch
//! │   ├── catalog.rs  ◄─── products
//! │   └── cart.rs     ◄─── cart mutations, checkout, reset
//! └── error.rs        ◄─── ApiError returned by the store
//! ```

pub mod commands;
pub mod error;
pub mod state;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Cli;
use shopfront_catalog::ShopfrontConfig;
use state::{Notice, Storefront};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter (stderr)                       │
/// │     • Default: info,shopfront=debug,sqlx=warn; override with RUST_LOG   │
/// │                                                                         │
/// │  2. Load Configuration                                                  │
/// │     • defaults → shopfront.toml → SHOPFRONT_* env → --db flag           │
/// │                                                                         │
/// │  3. Open Storefront                                                     │
/// │     • SQLite with WAL mode, pending migrations                          │
/// │     • Cart mirror loaded from the table                                 │
/// │                                                                         │
/// │  4. Execute Command, print notices to stderr and output to stdout      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Shopfront");

    let config = load_config(&cli)?;
    let store = Storefront::open(&config)
        .await
        .context("failed to open the store")?;

    let mut notices = store.subscribe_notices();
    let result = commands::execute(&store, cli.command, cli.json).await;

    // Notices go to stderr so JSON on stdout stays parseable
    for line in notice_lines(&mut notices) {
        eprintln!("{line}");
    }

    print!("{}", result?);
    Ok(())
}

/// Drains pending notices into user-facing lines, one per failed operation.
fn notice_lines(notices: &mut broadcast::Receiver<Notice>) -> Vec<String> {
    let mut lines = Vec::new();
    loop {
        match notices.try_recv() {
            Ok(notice) => lines.push(format!("! {}", notice.headline())),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                lines.push(format!("! {skipped} more notice(s) dropped"));
            }
            Err(_) => return lines,
        }
    }
}

/// Loads configuration and applies command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<ShopfrontConfig> {
    let mut config = match &cli.config {
        // An explicitly named file must load
        Some(path) => ShopfrontConfig::load(Some(path.clone()))
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ShopfrontConfig::load_or_default(None),
    };

    if let Some(db) = &cli.db {
        config.storage.database_path = Some(db.clone());
    }

    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront=trace` - Show trace for shopfront crates only
/// - Default: INFO, DEBUG for shopfront crates
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug,sqlx=warn"));

    // try_init: a second call (e.g. from tests) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
