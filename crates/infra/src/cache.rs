//! Derived-dataset caching with moka
//!
//! Normalization plus derivation is a deterministic function of the raw
//! sheet bytes and the column map, so its result can be memoized. The
//! cache key is a blake3 fingerprint of exactly those inputs: when the
//! source data changes the fingerprint changes, and the stale entry is
//! simply never addressed again (content-addressed invalidation).
//!
//! Entries hold `Arc`s; concurrent report builders share one immutable
//! derived dataset without copying or locking.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use workdeck_domain::{SaleRecord, TaskRecord};

/// Default TTL for derived-dataset entries (10 minutes)
///
/// Override via `WORKDECK_CACHE_TTL_SECONDS` environment variable
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;

/// Default max capacity (distinct source payloads)
///
/// Override via `WORKDECK_CACHE_MAX_CAPACITY` environment variable
pub const DEFAULT_CACHE_MAX_CAPACITY: u64 = 16;

/// Derived-dataset cache configuration
#[derive(Debug, Clone)]
pub struct DeriveCacheConfig {
    /// Time-to-live for cache entries
    pub ttl: Duration,

    /// Maximum number of entries in each cache
    pub max_capacity: u64,
}

impl Default for DeriveCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(
                std::env::var("WORKDECK_CACHE_TTL_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            ),
            max_capacity: std::env::var("WORKDECK_CACHE_MAX_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CACHE_MAX_CAPACITY),
        }
    }
}

impl DeriveCacheConfig {
    /// Create config with custom TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, max_capacity: DEFAULT_CACHE_MAX_CAPACITY }
    }
}

/// Content fingerprint over the inputs of a derivation run.
///
/// Feed every payload that influences the result (sheet bytes, serialized
/// column map); any byte change yields a new key.
pub fn fingerprint<'a, I>(payloads: I) -> String
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hasher = blake3::Hasher::new();
    for payload in payloads {
        // Length-prefix each payload so concatenation boundaries matter
        hasher.update(&(payload.len() as u64).to_le_bytes());
        hasher.update(payload);
    }
    hex::encode(hasher.finalize().as_bytes())
}

/// Memoization of normalize+derive, keyed by source fingerprint.
pub struct DeriveCache {
    tasks: Cache<String, Arc<Vec<TaskRecord>>>,
    sales: Cache<String, Arc<Vec<SaleRecord>>>,
}

impl DeriveCache {
    /// Create a cache with the given configuration.
    pub fn new(config: &DeriveCacheConfig) -> Self {
        Self {
            tasks: Cache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            sales: Cache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// Derived task records for the fingerprinted source, computing them
    /// once per key.
    pub fn tasks_for<F>(&self, key: &str, build: F) -> Arc<Vec<TaskRecord>>
    where
        F: FnOnce() -> Vec<TaskRecord>,
    {
        self.tasks.get_with_by_ref(key, || {
            tracing::debug!(key, "Task derivation cache miss");
            Arc::new(build())
        })
    }

    /// Derived sale records for the fingerprinted source, computing them
    /// once per key.
    pub fn sales_for<F>(&self, key: &str, build: F) -> Arc<Vec<SaleRecord>>
    where
        F: FnOnce() -> Vec<SaleRecord>,
    {
        self.sales.get_with_by_ref(key, || {
            tracing::debug!(key, "Sale derivation cache miss");
            Arc::new(build())
        })
    }
}

impl Default for DeriveCache {
    fn default() -> Self {
        Self::new(&DeriveCacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = fingerprint([b"sheet-one".as_slice()]);
        let b = fingerprint([b"sheet-two".as_slice()]);
        assert_ne!(a, b);
        // Deterministic for identical input
        assert_eq!(a, fingerprint([b"sheet-one".as_slice()]));
    }

    #[test]
    fn test_fingerprint_respects_payload_boundaries() {
        let joined = fingerprint([b"ab".as_slice(), b"c".as_slice()]);
        let split = fingerprint([b"a".as_slice(), b"bc".as_slice()]);
        assert_ne!(joined, split);
    }

    #[test]
    fn test_cache_builds_once_per_key() {
        let cache = DeriveCache::default();
        let builds = AtomicUsize::new(0);

        let make = || {
            builds.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        };

        let first = cache.tasks_for("key-1", make);
        let second = cache.tasks_for("key-1", make);
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));

        cache.tasks_for("key-2", make);
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }
}
