//! VectorTable implementation
//!
//! Vec-backed write buffer with an RwLock for concurrency. Writers append
//! under the exclusive lock; readers scan or snapshot under the shared
//! lock; the one-time sort happens through an iterator after freeze.

use std::mem;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::comparator::KeyComparator;

use super::iterator::VectorTableIterator;

/// Growable sequence of key handles, insertion-ordered until sorted
pub(super) type Bucket = Vec<Bytes>;

/// Lock-guarded state shared between a table and its frozen iterators
pub(super) struct Core {
    /// The live bucket
    pub(super) bucket: Bucket,

    /// No more inserts accepted. One-way: never cleared once set.
    pub(super) frozen: bool,

    /// The live bucket's physical order matches the comparator's order.
    /// Only ever set after `frozen`, by the first iterator positioned.
    pub(super) sorted: bool,
}

/// Returns true iff `a` and `b` are views of the same buffer, not merely
/// equal bytes.
pub(super) fn same_buffer(a: &Bytes, b: &Bytes) -> bool {
    a.as_ptr() == b.as_ptr() && a.len() == b.len()
}

/// In-memory write buffer over opaque key handles.
///
/// Keys are [`Bytes`] handles: the table clones handles, never the
/// underlying key bytes, so the caller (typically an arena that packed
/// key and value into a single buffer) retains ownership of the data.
///
/// ## Concurrency Model
///
/// - **Writes** (`insert`, `freeze`, the one-time sort): exclusive lock
/// - **Reads** (`contains`, `iter` branch, memory accounting): shared lock
///
/// Many readers proceed in parallel; any writer excludes all others. No
/// operation blocks longer than one lock hold; there is no I/O here.
pub struct VectorTable {
    /// Bucket + state flags, shared with frozen iterators
    core: Arc<RwLock<Core>>,

    /// Total order over key buffers (supplied by the engine, not owned)
    comparator: Arc<dyn KeyComparator>,
}

impl VectorTable {
    /// Create an empty write buffer ordered by `comparator`
    pub fn new(comparator: Arc<dyn KeyComparator>) -> Self {
        Self::with_capacity(comparator, 0)
    }

    /// Create an empty write buffer with an advisory pre-reservation.
    ///
    /// `capacity_hint` is in entries, not bytes, and is not a limit: the
    /// bucket grows unbounded past it.
    pub fn with_capacity(comparator: Arc<dyn KeyComparator>, capacity_hint: usize) -> Self {
        Self {
            core: Arc::new(RwLock::new(Core {
                bucket: Vec::with_capacity(capacity_hint),
                frozen: false,
                sorted: false,
            })),
            comparator,
        }
    }

    /// Append a key to the buffer (write lock). No ordering is
    /// established; the sort is deferred until iteration.
    ///
    /// Preconditions (debug-asserted, contract violations in release):
    /// - the buffer is not frozen
    /// - no handle to the same buffer was inserted before, and nothing
    ///   already present compares equal to `key`
    pub fn insert(&self, key: Bytes) {
        debug_assert!(!self.contains(&key), "key buffer inserted twice");
        let mut core = self.core.write();
        debug_assert!(!core.frozen, "insert on a frozen write buffer");
        core.bucket.push(key);
    }

    /// Returns true iff this exact buffer was previously inserted
    /// (read lock, linear scan).
    ///
    /// This compares buffer *identity* (same pointer and length), not
    /// comparator equality: two distinct allocations holding equal bytes
    /// are different entries to this check. It is a cheap duplicate-
    /// detection fast path for the writer that packs records, not a
    /// general membership lookup. The buffer is unsorted while mutable,
    /// so any lookup here is a linear scan.
    pub fn contains(&self, key: &Bytes) -> bool {
        let core = self.core.read();
        core.bucket.iter().any(|entry| same_buffer(entry, key))
    }

    /// Stop accepting writes (write lock). One-way; calling it again is
    /// harmless. After this, `insert` is a contract violation.
    pub fn freeze(&self) {
        let mut core = self.core.write();
        core.frozen = true;
        debug!(entries = core.bucket.len(), "write buffer frozen");
    }

    /// Whether `freeze` has been called
    pub fn is_frozen(&self) -> bool {
        self.core.read().frozen
    }

    /// Number of entries in the buffer (read lock)
    pub fn len(&self) -> usize {
        self.core.read().bucket.len()
    }

    /// Whether the buffer holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Approximate bookkeeping memory in bytes (read lock).
    ///
    /// Bucket capacity times handle size plus fixed overhead. An
    /// estimate for flush-threshold decisions, not an exact figure. The
    /// key bytes themselves are not counted; those belong to the
    /// caller's arena.
    pub fn approximate_memory_usage(&self) -> usize {
        let core = self.core.read();
        mem::size_of::<Core>() + core.bucket.capacity() * mem::size_of::<Bytes>()
    }

    /// Check if the buffer has outgrown `size_limit` bytes
    pub fn should_flush(&self, size_limit: usize) -> bool {
        self.approximate_memory_usage() >= size_limit
    }

    /// Create an iterator over the buffer's keys (read lock).
    ///
    /// The iterator is unpositioned; the first positioning call
    /// (`valid`, `seek`, `seek_to_first`, `seek_to_last`) triggers the
    /// lazy sort and places the cursor.
    ///
    /// Which bucket the iterator walks depends on the buffer's state:
    /// - **Frozen**: the iterator aliases the live bucket and keeps a
    ///   back-reference so the one-time sort is shared by every iterator
    ///   of this table. Nothing can mutate the bucket anymore, so
    ///   aliasing is safe and copying would be waste.
    /// - **Mutable**: the iterator owns a point-in-time copy of the
    ///   bucket (handle clones, not key bytes). Inserts after this call
    ///   are invisible to it, and it stays usable even after the table
    ///   is dropped.
    pub fn iter(&self) -> VectorTableIterator {
        let core = self.core.read();
        if core.frozen {
            VectorTableIterator::shared(Arc::clone(&self.core), Arc::clone(&self.comparator))
        } else {
            let snapshot = core.bucket.clone();
            trace!(entries = snapshot.len(), "copied mutable bucket for snapshot iteration");
            VectorTableIterator::private(snapshot, Arc::clone(&self.comparator))
        }
    }
}
