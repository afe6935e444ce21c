//! Configuration for Vectable
//!
//! Centralized configuration with sensible defaults. Both knobs are
//! advisory: the buffer grows past `capacity_hint` without complaint, and
//! `size_limit` is only consulted when the engine asks `should_flush`.

use crate::error::{Result, VectableError};

/// Configuration for a write buffer instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Advisory pre-reservation for the bucket, in entries (not bytes).
    /// Sized to the expected number of records between flushes.
    pub capacity_hint: usize,

    /// Advisory flush threshold in bytes, compared against
    /// `approximate_memory_usage` by the surrounding engine.
    pub size_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_hint: 0,
            size_limit: 64 * 1024 * 1024, // 64 MB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the bucket pre-reservation (in entries)
    pub fn capacity_hint(mut self, count: usize) -> Self {
        self.config.capacity_hint = count;
        self
    }

    /// Set the flush threshold (in bytes)
    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.config.size_limit = bytes;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<Config> {
        if self.config.size_limit == 0 {
            return Err(VectableError::Config(
                "size_limit must be non-zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
