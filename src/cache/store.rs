//! Bounded Cache Module
//!
//! Insertion-ordered map guarded by a single exclusive lock, with bulk fractional
//! purging instead of per-item eviction.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info, trace, warn};

use crate::cache::stats::{CacheCounters, CacheStats};
use crate::cache::{CacheStore, SharedCache};
use crate::config::{CacheConfig, DEFAULT_MAX_KEYS, DEFAULT_PURGE_FRACTION};
use crate::error::Result;

// == Bounded Cache ==
/// Thread-safe memoization cache with a soft key-count limit.
///
/// Keys are kept in strict insertion order; overwriting a key re-inserts it at the
/// end. Once the store holds `max_keys` entries, the next write first drops the
/// oldest `len / purge_fraction` keys. Reads never influence that order.
///
/// # Consistency
/// Mutators (`write`, `clear`, `prune`) serialize on the store's write guard.
/// `read` only takes a shared guard, so readers never wait on one another and may
/// observe the cache either side of a concurrent mutation. `fetch` is not atomic:
/// concurrent misses on one key can each run their computation, last write wins.
pub struct BoundedCache<K, V> {
    /// Ordered key-value storage; its write guard is the mutation lock
    store: RwLock<IndexMap<K, Arc<V>>>,
    /// Store size at which the next write purges
    max_keys: usize,
    /// Divisor used by the purge triggered from `write`
    purge_fraction: usize,
    /// Activity counters
    counters: CacheCounters,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq,
{
    // == Constructors ==
    /// Creates a cache that starts purging at `max_keys` entries.
    ///
    /// A `max_keys` of zero falls back to [`DEFAULT_MAX_KEYS`].
    pub fn new(max_keys: usize) -> Self {
        let max_keys = if max_keys == 0 {
            warn!(
                "max_keys of 0 is not usable, falling back to {}",
                DEFAULT_MAX_KEYS
            );
            DEFAULT_MAX_KEYS
        } else {
            max_keys
        };
        Self::with_parts(max_keys, DEFAULT_PURGE_FRACTION)
    }

    /// Creates a cache with the default threshold of 5000 keys.
    pub fn with_default_capacity() -> Self {
        Self::with_parts(DEFAULT_MAX_KEYS, DEFAULT_PURGE_FRACTION)
    }

    /// Creates a cache from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(config.max_keys, config.purge_fraction))
    }

    /// Creates a cache behind a shareable handle.
    pub fn shared(max_keys: usize) -> SharedCache<K, V> {
        Arc::new(Self::new(max_keys))
    }

    fn with_parts(max_keys: usize, purge_fraction: usize) -> Self {
        Self {
            store: RwLock::new(IndexMap::new()),
            max_keys,
            purge_fraction,
            counters: CacheCounters::default(),
        }
    }

    // == Read ==
    /// Looks a key up without touching the mutation lock or the eviction order.
    pub fn read<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.store.read().get(key).cloned();
        match value {
            Some(_) => self.counters.record_hit(),
            None => self.counters.record_miss(),
        }
        value
    }

    // == Write ==
    /// Purges if the store is full, then stores `value` under `key`.
    ///
    /// The purge runs before the insert, so the key being written always survives
    /// its own write.
    pub fn write(&self, key: K, value: V) {
        self.insert(key, Arc::new(value));
    }

    // == Fetch ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs outside the lock.
    pub fn fetch<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.read(&key) {
            return value;
        }

        trace!("Cache miss, computing value");
        let value = Arc::new(compute());
        self.insert(key, Arc::clone(&value));
        value
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        let removed = {
            let mut store = self.store.write();
            std::mem::take(&mut *store)
        };
        self.counters.record_clear();
        info!("Cache cleared, dropped {} entries", removed.len());
    }

    // == Prune ==
    /// Drops the oldest `len / target_fraction` keys if the store holds at least
    /// `max_keys` entries. Returns the number of keys removed.
    ///
    /// A `target_fraction` of zero is treated as one.
    pub fn prune(&self, target_fraction: usize) -> usize {
        let evicted = {
            let mut store = self.store.write();
            self.prune_locked(&mut store, target_fraction)
        };
        evicted.len()
    }

    // == Accessors ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Checks for a key without counting a hit or miss.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.read().contains_key(key)
    }

    /// Store size at which writes start purging.
    pub fn max_keys(&self) -> usize {
        self.max_keys
    }

    /// Divisor applied by the purge inside `write`.
    pub fn purge_fraction(&self) -> usize {
        self.purge_fraction
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.len())
    }

    // == Internals ==
    fn insert(&self, key: K, value: Arc<V>) {
        // Evicted and replaced values are dropped after the guard is released.
        let (_evicted, _replaced) = {
            let mut store = self.store.write();
            let evicted = self.prune_locked(&mut store, self.purge_fraction);
            // Re-insert so an overwritten key moves to the back of the order.
            let replaced = store.shift_remove(&key);
            store.insert(key, value);
            (evicted, replaced)
        };
        self.counters.record_write();
    }

    fn prune_locked(
        &self,
        store: &mut IndexMap<K, Arc<V>>,
        target_fraction: usize,
    ) -> Vec<(K, Arc<V>)> {
        let store_size = store.len();
        if store_size < self.max_keys {
            return Vec::new();
        }

        let count = store_size / target_fraction.max(1);
        if count == 0 {
            debug!(
                "Purge at {} entries removed nothing (fraction {})",
                store_size, target_fraction
            );
            return Vec::new();
        }

        let evicted: Vec<_> = store.drain(..count).collect();
        self.counters.record_purge(count);
        debug!(
            "Purged {} of {} entries, {} remaining",
            count,
            store_size,
            store.len()
        );
        evicted
    }
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Snapshot of the keys, oldest first (the order purging consumes them).
    pub fn keys(&self) -> Vec<K> {
        self.store.read().keys().cloned().collect()
    }
}

impl<K, V> Default for BoundedCache<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("len", &self.store.read().len())
            .field("max_keys", &self.max_keys)
            .field("purge_fraction", &self.purge_fraction)
            .finish()
    }
}

impl<K, V> CacheStore<K, V> for BoundedCache<K, V>
where
    K: Hash + Eq,
{
    fn fetch<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        BoundedCache::fetch(self, key, compute)
    }

    fn read<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        BoundedCache::read(self, key)
    }

    fn write(&self, key: K, value: V) {
        BoundedCache::write(self, key, value)
    }

    fn clear(&self) {
        BoundedCache::clear(self)
    }
}
