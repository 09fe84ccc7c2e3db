//! # PixelMart Storefront Library
//!
//! Cart session, marketplace client and checkout flow behind the
//! `pixelmart` shell binary.
//!
//! ## Module Organization
//! ```text
//! pixelmart_storefront/
//! ├── lib.rs          ◄─── You are here (startup helpers)
//! ├── config.rs       ◄─── StorefrontConfig from PIXELMART_* variables
//! ├── client.rs       ◄─── Marketplace trait + reqwest implementation
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore (cart + snapshot slot)
//! │   └── snapshot.rs ◄─── SnapshotStore trait, SQLite + memory stores
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Order submission
//! │   └── status.rs   ◄─── Session diagnostics
//! ├── shell.rs        ◄─── Line parser, dispatcher and renderer
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,pixelmart=debug,sqlx=warn (override with RUST_LOG)  │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • PIXELMART_* variables, defaults otherwise                         │
//! │                                                                         │
//! │  3. Open Snapshot Database ───────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │     • On failure: warn and run the session in memory                    │
//! │                                                                         │
//! │  4. Hydrate Cart ─────────────────────────────────────────────────────► │
//! │     • CartStore::hydrate(slot), the one async gate before use           │
//! │                                                                         │
//! │  5. Run Shell ────────────────────────────────────────────────────────► │
//! │     • stdin commands until quit / EOF                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod shell;
pub mod state;

use pixelmart_db::{Database, DbConfig, SnapshotRepository};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;
use error::ApiError;
use state::CartStore;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pixelmart=trace` - Show trace for pixelmart crates only
/// - Default: INFO, DEBUG for pixelmart
///
/// Output goes to stderr; stdout belongs to the shell.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pixelmart=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the snapshot database and hydrates the cart session.
///
/// Never fails on storage problems: without a database the session runs
/// in memory and `Database` is `None`.
pub async fn open_session(
    config: &StorefrontConfig,
) -> Result<(CartStore<SnapshotRepository>, Option<Database>), ApiError> {
    let policy = config.fee_policy();
    info!(
        tax_rate_bps = policy.tax_rate.bps(),
        flat_fee = %policy.flat_fee,
        "Fee policy in effect"
    );

    let db_path = config.database_path()?;
    info!(?db_path, "Database path determined");

    match Database::new(DbConfig::new(db_path)).await {
        Ok(db) => {
            info!("Database connected and migrations applied");
            let cart = CartStore::hydrate(db.snapshots(), config.cart_slot.clone(), policy).await;
            Ok((cart, Some(db)))
        }
        Err(e) => {
            warn!(error = %e, "Snapshot database unavailable, cart will not be saved");
            Ok((CartStore::detached(config.cart_slot.clone(), policy), None))
        }
    }
}
