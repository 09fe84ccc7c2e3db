//! # State Module
//!
//! Session state for the storefront shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  CartStore<S>                                                   │   │
//! │  │  • Cart (pixelmart-core)        • FeePolicy                     │   │
//! │  │  • slot name                    • Option<S> (None = in-memory)  │   │
//! │  └───────────────────────────────┬─────────────────────────────────┘   │
//! │                                  │ S: SnapshotStore                     │
//! │                 ┌────────────────┴─────────────────┐                    │
//! │                 ▼                                  ▼                    │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │  SnapshotRepository      │      │  MemorySnapshotStore     │        │
//! │  │  (SQLite slot table)     │      │  (tests, embedding)      │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  OWNERSHIP: the shell owns the CartStore and lends it by &mut.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod snapshot;

pub use cart::CartStore;
pub use snapshot::{MemorySnapshotStore, SnapshotError, SnapshotStore};
