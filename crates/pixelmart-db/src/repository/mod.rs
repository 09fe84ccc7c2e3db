//! # Repository Module
//!
//! Database repository implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore                                                              │
//! │       │                                                                 │
//! │       │  db.snapshots().save("cart", json)                              │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                     │
//! │  ├── load(&self, slot)                                                  │
//! │  ├── save(&self, slot, payload)                                         │
//! │  ├── delete(&self, slot)                                                │
//! │  └── slots(&self)                                                       │
//! │       │                                                                 │
//! │       ▼  SQL                                                            │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod snapshot;
