//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, writes and purges.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that found the key
    pub hits: u64,
    /// Reads that did not find the key
    pub misses: u64,
    /// Completed writes
    pub writes: u64,
    /// Purge passes that removed at least one key
    pub purges: u64,
    /// Keys removed by purging
    pub evictions: u64,
    /// Calls to clear
    pub clears: u64,
    /// Number of entries when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Counters ==
/// Live counters, updated without the store lock.
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    purges: AtomicU64,
    evictions: AtomicU64,
    clears: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_purge(&self, evicted: usize) {
        self.purges.fetch_add(1, Ordering::Relaxed);
        self.evictions.fetch_add(evicted as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            purges: self.purges.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            total_entries,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_starts_at_zero() {
        let counters = CacheCounters::default();
        assert_eq!(counters.snapshot(0), CacheStats::default());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let counters = CacheCounters::default();
        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        assert_eq!(counters.snapshot(0).hit_rate(), 0.75);
    }

    #[test]
    fn test_record_purge_accumulates_evictions() {
        let counters = CacheCounters::default();
        counters.record_purge(3);
        counters.record_purge(5);

        let stats = counters.snapshot(7);
        assert_eq!(stats.purges, 2);
        assert_eq!(stats.evictions, 8);
        assert_eq!(stats.total_entries, 7);
    }

    #[test]
    fn test_stats_serialize() {
        let counters = CacheCounters::default();
        counters.record_write();
        counters.record_clear();

        let json = serde_json::to_value(counters.snapshot(1)).unwrap();
        assert_eq!(json["writes"], 1);
        assert_eq!(json["clears"], 1);
        assert_eq!(json["total_entries"], 1);
    }
}
