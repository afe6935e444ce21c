//! VectorTable Tests
//!
//! Tests verify:
//! - Construction (direct, factory, config-driven)
//! - Insert and exact-buffer membership
//! - Freeze transition
//! - Memory accounting and flush triggers

use std::sync::Arc;

use bytes::Bytes;
use vectable::{BytewiseComparator, Config, KeyComparator, VectorTable, VectorTableFactory};

fn bytewise() -> Arc<dyn KeyComparator> {
    Arc::new(BytewiseComparator)
}

fn key(s: &str) -> Bytes {
    Bytes::copy_from_slice(s.as_bytes())
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_new_table_is_empty() {
    let table = VectorTable::new(bytewise());
    assert_eq!(table.len(), 0);
    assert!(table.is_empty());
    assert!(!table.is_frozen());
}

#[test]
fn test_with_capacity_reserves_up_front() {
    let table = VectorTable::with_capacity(bytewise(), 128);
    let reserved = table.approximate_memory_usage();

    // Inserting within the hint must not grow the bucket
    for i in 0..128 {
        table.insert(key(&format!("key{:03}", i)));
    }
    assert_eq!(table.approximate_memory_usage(), reserved);
}

#[test]
fn test_capacity_hint_is_not_a_limit() {
    let table = VectorTable::with_capacity(bytewise(), 2);

    for i in 0..100 {
        table.insert(key(&format!("key{:03}", i)));
    }
    assert_eq!(table.len(), 100);
}

#[test]
fn test_factory_creates_fresh_tables() {
    let factory = VectorTableFactory::new(16);

    let first = factory.create(bytewise());
    first.insert(key("a"));
    first.freeze();

    // The next table starts over from scratch
    let second = factory.create(bytewise());
    assert!(second.is_empty());
    assert!(!second.is_frozen());
}

#[test]
fn test_factory_from_config() {
    let config = Config::builder()
        .capacity_hint(64)
        .size_limit(1024)
        .build()
        .unwrap();

    let table = VectorTableFactory::from_config(&config).create(bytewise());
    assert!(table.is_empty());
}

#[test]
fn test_config_rejects_zero_size_limit() {
    let result = Config::builder().size_limit(0).build();
    assert!(result.is_err());
}

// =============================================================================
// Insert / Contains Tests
// =============================================================================

#[test]
fn test_insert_appends_entries() {
    let table = VectorTable::new(bytewise());

    table.insert(key("cherry"));
    table.insert(key("apple"));
    table.insert(key("banana"));

    assert_eq!(table.len(), 3);
}

#[test]
fn test_contains_same_buffer() {
    let table = VectorTable::new(bytewise());

    let k = key("key1");
    table.insert(k.clone());

    // Clones of a Bytes handle view the same buffer
    assert!(table.contains(&k));
}

#[test]
fn test_contains_is_identity_not_equality() {
    let table = VectorTable::new(bytewise());

    table.insert(key("key1"));

    // A second allocation with equal bytes is a different buffer and
    // is not reported present
    let lookalike = key("key1");
    assert!(!table.contains(&lookalike));
}

#[test]
fn test_contains_on_empty_table() {
    let table = VectorTable::new(bytewise());
    assert!(!table.contains(&key("anything")));
}

#[test]
fn test_empty_key_insert() {
    let table = VectorTable::new(bytewise());

    let empty = Bytes::new();
    table.insert(empty);
    assert_eq!(table.len(), 1);
}

// =============================================================================
// Freeze Tests
// =============================================================================

#[test]
fn test_freeze_sets_frozen() {
    let table = VectorTable::new(bytewise());
    assert!(!table.is_frozen());

    table.freeze();
    assert!(table.is_frozen());
}

#[test]
fn test_freeze_is_idempotent() {
    let table = VectorTable::new(bytewise());
    table.insert(key("a"));

    table.freeze();
    table.freeze();

    assert!(table.is_frozen());
    assert_eq!(table.len(), 1);
}

#[test]
fn test_freeze_preserves_entries() {
    let table = VectorTable::new(bytewise());
    table.insert(key("a"));
    table.insert(key("b"));

    table.freeze();
    assert_eq!(table.len(), 2);
}

// =============================================================================
// Memory Accounting Tests
// =============================================================================

#[test]
fn test_memory_usage_has_fixed_overhead() {
    let table = VectorTable::new(bytewise());
    assert!(table.approximate_memory_usage() > 0);
}

#[test]
fn test_memory_usage_grows_with_capacity() {
    let table = VectorTable::new(bytewise());
    let empty_usage = table.approximate_memory_usage();

    for i in 0..1000 {
        table.insert(key(&format!("key{:04}", i)));
    }
    assert!(table.approximate_memory_usage() > empty_usage);
}

#[test]
fn test_should_flush_under_limit() {
    let table = VectorTable::new(bytewise());
    table.insert(key("a"));

    assert!(!table.should_flush(usize::MAX));
}

#[test]
fn test_should_flush_over_limit() {
    let table = VectorTable::new(bytewise());
    for i in 0..100 {
        table.insert(key(&format!("key{:03}", i)));
    }

    assert!(table.should_flush(1));
}
