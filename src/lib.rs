//! Memocache - A bounded, thread-safe memoization cache
//!
//! Avoids recomputing expensive derived values (parse results keyed by their input,
//! for instance) by remembering them in a shared map. When the map reaches its
//! configured size, a fixed fraction of the oldest keys is purged in bulk before the
//! next insert.
//!
//! ```rust
//! use memocache::{BoundedCache, CacheStore};
//!
//! let cache: BoundedCache<String, usize> = BoundedCache::new(5000);
//! let len = cache.fetch("Mozilla/5.0".to_string(), || "Mozilla/5.0".len());
//! assert_eq!(*len, 11);
//! assert_eq!(cache.read(&"Mozilla/5.0".to_string()).as_deref(), Some(&11));
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BoundedCache, CacheStats, CacheStore, SharedCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
