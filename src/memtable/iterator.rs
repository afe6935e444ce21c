//! VectorTable Iterator
//!
//! Cursor over a write buffer's keys in comparator order, with the sort
//! deferred until the first positioning call.

use std::cmp::Ordering;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tracing::trace;

use crate::comparator::KeyComparator;

use super::vector::{Bucket, Core};

/// The sequence an iterator walks: either the table's live bucket
/// (frozen table, aliased through the lock) or a private copy taken at
/// creation time (mutable table).
enum BucketHandle {
    /// Aliases the frozen table's bucket; the back-reference lets this
    /// iterator participate in the table-wide one-time sort
    Shared(Arc<RwLock<Core>>),

    /// Exclusively owned snapshot; no coordination needed
    Private(Bucket),
}

/// Iterator over write-buffer keys in comparator order.
///
/// ## Cursor Model
/// All positioning calls (`valid`, `seek`, `seek_to_first`,
/// `seek_to_last`) first establish the sort; `key` and `prev` require
/// `valid()` and debug-assert it. `next` past the end and `prev` past
/// the start both land on the same past-end sentinel, so there is a
/// single recognizable invalid state regardless of walk direction.
///
/// Triggering the sort discards any previously held position: the cursor
/// resets to the start of the newly ordered sequence.
pub struct VectorTableIterator {
    /// Shared or private bucket (see [`BucketHandle`])
    handle: BucketHandle,

    /// Same total order the owning table was built with
    comparator: Arc<dyn KeyComparator>,

    /// Cursor position; `pos == len` is the past-end sentinel
    pos: usize,

    /// This iterator has established the sort (locally or by observing
    /// the table-wide flag)
    sorted: bool,
}

impl VectorTableIterator {
    /// Iterator aliasing a frozen table's bucket
    pub(super) fn shared(core: Arc<RwLock<Core>>, comparator: Arc<dyn KeyComparator>) -> Self {
        Self {
            handle: BucketHandle::Shared(core),
            comparator,
            pos: 0,
            sorted: false,
        }
    }

    /// Iterator over a private point-in-time copy
    pub(super) fn private(bucket: Bucket, comparator: Arc<dyn KeyComparator>) -> Self {
        Self {
            handle: BucketHandle::Private(bucket),
            comparator,
            pos: 0,
            sorted: false,
        }
    }

    /// Establish the sort if this iterator has not yet observed it.
    ///
    /// Shared case: take the table's write lock and double-check the
    /// table-wide `sorted` flag. The flag alone is not enough because
    /// the sort itself is not atomic. Whichever iterator gets the lock
    /// first pays for the sort; everyone else finds the flag set and
    /// skips it. At most one physical sort happens per frozen table no
    /// matter how many iterators race here.
    ///
    /// Private case: the bucket is exclusively owned, sort in place.
    ///
    /// Either way the cursor resets to the start of the ordered
    /// sequence.
    fn do_sort(&mut self) {
        if self.sorted {
            return;
        }
        match &mut self.handle {
            BucketHandle::Shared(core) => {
                let mut core = core.write();
                if !core.sorted {
                    core.bucket
                        .sort_unstable_by(|a, b| self.comparator.compare(a, b));
                    core.sorted = true;
                    trace!(entries = core.bucket.len(), "sorted shared bucket");
                }
            }
            BucketHandle::Private(bucket) => {
                bucket.sort_unstable_by(|a, b| self.comparator.compare(a, b));
            }
        }
        self.pos = 0;
        self.sorted = true;
    }

    /// Entry count of the underlying bucket
    fn len(&self) -> usize {
        match &self.handle {
            BucketHandle::Shared(core) => core.read().bucket.len(),
            BucketHandle::Private(bucket) => bucket.len(),
        }
    }

    /// Returns true iff the cursor references an existing entry.
    ///
    /// Triggers the lazy sort, so the first call on a fresh iterator
    /// positions it at the start of the ordered sequence.
    pub fn valid(&mut self) -> bool {
        self.do_sort();
        self.pos < self.len()
    }

    /// Returns the key at the cursor.
    ///
    /// Precondition: `valid()` (debug-asserted; out-of-range access
    /// panics in release).
    pub fn key(&self) -> Bytes {
        debug_assert!(self.sorted, "key() before positioning");
        match &self.handle {
            BucketHandle::Shared(core) => core.read().bucket[self.pos].clone(),
            BucketHandle::Private(bucket) => bucket[self.pos].clone(),
        }
    }

    /// Advance one position. Clamped at the end: calling `next` on the
    /// past-end sentinel is a no-op and the iterator stays invalid.
    pub fn next(&mut self) {
        if self.pos < self.len() {
            self.pos += 1;
        }
    }

    /// Step back one position. Precondition: `valid()`. Stepping back
    /// from the first entry lands on the past-end sentinel, the same
    /// invalid state `next` runs off into, so the sequence has one
    /// out-of-bounds marker in both directions.
    pub fn prev(&mut self) {
        debug_assert!(self.valid(), "prev() on an invalid iterator");
        if self.pos == 0 {
            self.pos = self.len();
        } else {
            self.pos -= 1;
        }
    }

    /// Position at the first entry with key >= `target` (lower bound);
    /// past-end if every key is less. Triggers the lazy sort.
    pub fn seek(&mut self, target: &[u8]) {
        self.do_sort();
        let comparator = &self.comparator;
        self.pos = match &self.handle {
            BucketHandle::Shared(core) => core
                .read()
                .bucket
                .partition_point(|key| comparator.compare(key, target) == Ordering::Less),
            BucketHandle::Private(bucket) => {
                bucket.partition_point(|key| comparator.compare(key, target) == Ordering::Less)
            }
        };
    }

    /// Position at the first entry; invalid iff the bucket is empty.
    /// Triggers the lazy sort.
    pub fn seek_to_first(&mut self) {
        self.do_sort();
        self.pos = 0;
    }

    /// Position at the last entry; invalid iff the bucket is empty.
    /// Triggers the lazy sort.
    pub fn seek_to_last(&mut self) {
        self.do_sort();
        let len = self.len();
        self.pos = if len == 0 { 0 } else { len - 1 };
    }
}
