//! # pixelmart-db: Snapshot Persistence
//!
//! Durable local storage for the storefront's cart snapshot. The browser
//! storefront kept the cart in a named key-value slot; here the same slots
//! live in a SQLite table so the cart survives restarts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PixelMart Data Flow                                │
//! │                                                                         │
//! │  CartStore mutation (add / update / remove / clear)                    │
//! │       │                                                                 │
//! │       ▼  serialized snapshot (JSON array)                               │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  pixelmart-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ SnapshotRepository │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│  load / save /     │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │  delete / slots    │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pixelmart.db (local file, WAL mode)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pixelmart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("pixelmart.db")).await?;
//! db.snapshots().save("cart", "[]").await?;
//! let payload = db.snapshots().load("cart").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::{SnapshotRecord, SnapshotRepository};
