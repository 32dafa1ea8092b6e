//! Cache Module
//!
//! Bounded memoization cache with fractional bulk purge.

mod stats;
mod store;
mod traits;


use std::sync::Arc;

// Re-export public types
pub use stats::CacheStats;
pub use store::BoundedCache;
pub use traits::CacheStore;

/// Shared handle to one cache instance.
///
/// Create it once in the owning context and pass clones to every collaborator.
pub type SharedCache<K, V> = Arc<BoundedCache<K, V>>;
