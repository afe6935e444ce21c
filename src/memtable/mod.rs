//! MemTable Module
//!
//! In-memory write buffer for recent writes, staged here until the engine
//! flushes them to sorted on-disk tables.
//!
//! ## Responsibilities
//! - Accept unordered inserts cheaply (append, no per-write sorting)
//! - Answer exact-buffer membership queries for duplicate detection
//! - Track approximate memory usage for flush triggers
//! - Produce ordered iteration on demand, sorting at most once
//!
//! ## Data Structure Choice
//! A plain `Vec` of key handles behind an `RwLock`, sorted lazily:
//! - Insert cost is a single append; the sort is paid once, when the
//!   first iterator is positioned
//! - Iterators taken while the buffer is mutable get a private snapshot;
//!   iterators taken after `freeze` alias the shared bucket
//! - Trade-off: point lookups are linear, so this buffer suits
//!   write-heavy fill-then-flush workloads, not read-mostly ones
//!
//! ## Lifecycle
//! ```text
//! Mutable ──freeze()──▶ Frozen (unsorted) ──first position──▶ Frozen (sorted)
//! ```
//! No transition goes back. `insert` is only legal while mutable; the
//! buffer is discarded after flush and rebuilt from the factory.

mod iterator;
mod vector;

use std::sync::Arc;

use crate::comparator::KeyComparator;
use crate::config::Config;

pub use iterator::VectorTableIterator;
pub use vector::VectorTable;

// =============================================================================
// Factory
// =============================================================================

/// Factory for stamping out write buffers.
///
/// The engine holds one factory and creates a fresh [`VectorTable`] after
/// every flush, carrying the same capacity hint each time.
#[derive(Debug, Clone, Copy)]
pub struct VectorTableFactory {
    /// Advisory pre-reservation for each new bucket (entries)
    capacity_hint: usize,
}

impl VectorTableFactory {
    /// Create a factory with the given pre-reservation hint
    pub fn new(capacity_hint: usize) -> Self {
        Self { capacity_hint }
    }

    /// Create a factory from engine configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            capacity_hint: config.capacity_hint,
        }
    }

    /// Create a new, empty write buffer ordered by `comparator`
    pub fn create(&self, comparator: Arc<dyn KeyComparator>) -> VectorTable {
        VectorTable::with_capacity(comparator, self.capacity_hint)
    }
}
