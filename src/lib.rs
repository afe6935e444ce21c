//! # Vectable
//!
//! A vector-backed, sort-on-demand write buffer for log-structured
//! storage engines:
//! - O(1) amortized unordered inserts under a short-held lock
//! - Lazy, at-most-once sort when iteration is first requested
//! - Snapshot-isolated iterators while the buffer is still mutable
//! - Shared zero-copy iterators once the buffer is frozen
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Storage Engine                            │
//! │         (WAL, flush scheduling, SSTable writers)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ insert / contains / freeze
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   VectorTable                                │
//! │          (RwLock: bucket + frozen + sorted)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ iter()
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Private   │          │   Shared    │
//!   │  (mutable:  │          │  (frozen:   │
//!   │  snapshot)  │          │  aliased)   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! The buffer accepts writes until the engine freezes it ahead of a
//! flush; after the flush completes the engine discards it and stamps
//! out a fresh one from the [`VectorTableFactory`].

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod comparator;
pub mod memtable;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, VectableError};
pub use config::Config;
pub use comparator::{BytewiseComparator, KeyComparator, ReverseBytewiseComparator};
pub use memtable::{VectorTable, VectorTableFactory, VectorTableIterator};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Vectable
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
