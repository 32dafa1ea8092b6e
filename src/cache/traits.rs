//! Cache Store Contract
//!
//! The narrow interface a memoizing collaborator depends on, so the backing store can
//! be swapped without touching callers.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

// == Cache Store Trait ==
/// Read-through key/value store.
///
/// Values come back as `Arc<V>`: the store keeps its own reference and hands out
/// shared ones, never cloning the payload.
pub trait CacheStore<K, V> {
    /// Returns the cached value, or computes, stores and returns it.
    ///
    /// Not atomic: two callers missing the same key may both run `compute`.
    fn fetch<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V;

    /// Returns the stored value, if any.
    fn read<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: K, value: V);

    /// Removes every entry.
    fn clear(&self);
}

impl<K, V, S> CacheStore<K, V> for Arc<S>
where
    S: CacheStore<K, V>,
{
    fn fetch<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        (**self).fetch(key, compute)
    }

    fn read<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        (**self).read(key)
    }

    fn write(&self, key: K, value: V) {
        (**self).write(key, value)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
