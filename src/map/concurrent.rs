//! Concurrent Map Implementation
//!
//! This module implements a key-value map that can be shared between threads
//! without any external synchronization. It follows exactly the same locking
//! discipline as [`ConcurrentSet`](crate::set::ConcurrentSet), applied to
//! key/value pairs.
//!
//! ## Design
//!
//! - One `IndexMap` owned by the instance, guarded by one reader/writer lock;
//!   arbitrary removal pops the last slot in constant time
//! - Lookups (`contains`, `get`, `len`, `all`) share the lock
//! - Mutations (`add`, `pop`, `remove`, `clear`, batches) hold it exclusively
//! - Values leave the lock only as owned copies or by being removed
//!
//! ## Example
//!
//! ```rust
//! use concurrent_store::ConcurrentMap;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let map = Arc::new(ConcurrentMap::new());
//!
//! let writer = thread::spawn({
//!     let map = Arc::clone(&map);
//!     move || {
//!         for i in 0..1000 {
//!             map.add(i, i * 2);
//!         }
//!     }
//! });
//! writer.join().unwrap();
//!
//! let sum: i32 = map.all().values().sum();
//! assert_eq!(sum, 999000);
//! ```

use crate::metrics::{AtomicMetrics, MetricsCollector, PerformanceMetrics};
use crate::sync::{write_or_contend, RwLock, RwLockWriteGuard};
use crate::{Error, Result};
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::time::Instant;

/// A thread-safe key-value map
///
/// Adding an existing key overwrites its value. All state lives behind one
/// reader/writer lock.
///
/// # Type Parameters
///
/// * `K` - The key type, must implement `Hash + Eq`
/// * `V` - The value type
///
/// Snapshots additionally need `K: Clone`, and `all` and `get` need
/// `V: Clone`.
///
/// # Examples
///
/// ```rust
/// use concurrent_store::ConcurrentMap;
///
/// let map: ConcurrentMap<i32, String> = ConcurrentMap::new();
/// map.add(1, "hello".to_string());
/// map.add(1, "world".to_string());
/// assert_eq!(map.get(&1), Some("world".to_string()));
/// assert_eq!(map.len(), 1);
/// ```
pub struct ConcurrentMap<K, V> {
    entries: RwLock<IndexMap<K, V>>,
    metrics: AtomicMetrics,
}

impl<K, V> ConcurrentMap<K, V> {
    /// Create a new, empty map
    pub fn new() -> Self {
        Self::from_map(IndexMap::new())
    }

    /// Create a new, empty map able to hold at least `capacity` entries
    /// without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_map(IndexMap::with_capacity(capacity))
    }

    fn from_map(entries: IndexMap<K, V>) -> Self {
        let metrics = AtomicMetrics::default();
        metrics.update_len(entries.len());
        Self {
            entries: RwLock::new(entries),
            metrics,
        }
    }

    /// Number of entries currently in the map
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the map currently has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove every entry
    pub fn clear(&self) {
        let mut entries = self.write();
        if !entries.is_empty() {
            log::debug!("clearing map with {} entries", entries.len());
        }
        entries.clear();
        self.metrics.update_len(0);
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<K, V>> {
        write_or_contend(&self.entries, || self.metrics.record_contention())
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Hash + Eq,
{
    /// Insert or overwrite the value for `key`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concurrent_store::ConcurrentMap;
    ///
    /// let map = ConcurrentMap::new();
    /// map.add("k", 1);
    /// map.add("k", 2);
    /// assert_eq!(map.get("k"), Some(2));
    /// ```
    pub fn add(&self, key: K, value: V) {
        let start = Instant::now();
        {
            let mut entries = self.write();
            entries.insert(key, value);
            self.metrics.update_len(entries.len());
        }
        self.metrics.record_success(start.elapsed());
    }

    /// Whether `key` currently has a value
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.read().contains_key(key)
    }

    /// Remove `key`, returning its value if it was present
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let start = Instant::now();
        let removed = {
            let mut entries = self.write();
            let removed = entries.swap_remove(key);
            self.metrics.update_len(entries.len());
            removed
        };

        match removed {
            Some(_) => self.metrics.record_success(start.elapsed()),
            None => self.metrics.record_failure(),
        }
        removed
    }

    /// Insert or overwrite many entries under a single lock acquisition
    ///
    /// Returns how many keys were not already present; overwrites are not
    /// counted.
    pub fn add_batch<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let start = Instant::now();
        let inserted = {
            let mut guard = self.write();
            let inserted = entries.into_iter().fold(0, |count, (key, value)| {
                count + usize::from(guard.insert(key, value).is_none())
            });
            self.metrics.update_len(guard.len());
            inserted
        };
        self.metrics.record_success(start.elapsed());
        inserted
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Copy of the value currently stored for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.read().get(key).cloned()
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Hash + Eq,
{
    /// Remove and return an arbitrary entry
    ///
    /// Which entry is returned when several are present is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the map has no entries at the time of the
    /// call. The call never waits for an entry to arrive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concurrent_store::{ConcurrentMap, Error};
    ///
    /// let map = ConcurrentMap::new();
    /// assert_eq!(map.pop(), Err(Error::Empty));
    ///
    /// map.add("key", 42);
    /// assert_eq!(map.pop(), Ok(("key", 42)));
    /// assert!(!map.contains("key"));
    /// ```
    pub fn pop(&self) -> Result<(K, V)> {
        let start = Instant::now();
        let popped = {
            let mut entries = self.write();
            let popped = entries.pop();
            self.metrics.update_len(entries.len());
            popped
        };

        match popped {
            Some(entry) => {
                self.metrics.record_success(start.elapsed());
                Ok(entry)
            }
            None => {
                log::trace!("pop on empty map");
                self.metrics.record_failure();
                Err(Error::Empty)
            }
        }
    }

    /// Remove and return up to `max` arbitrary entries under a single lock
    /// acquisition
    ///
    /// Returns an empty vector when the map is empty.
    pub fn pop_batch(&self, max: usize) -> Vec<(K, V)> {
        let start = Instant::now();
        let (was_empty, popped) = {
            let mut entries = self.write();
            let was_empty = entries.is_empty();
            let count = max.min(entries.len());
            let popped: Vec<(K, V)> = (0..count).filter_map(|_| entries.pop()).collect();
            self.metrics.update_len(entries.len());
            (was_empty, popped)
        };

        if was_empty {
            log::trace!("pop_batch on empty map");
            self.metrics.record_failure();
        } else {
            self.metrics.record_success(start.elapsed());
        }
        popped
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Snapshot of every entry currently in the map
    ///
    /// The returned map is an independent copy: later changes to `self` do
    /// not show up in it, and changes to it do not reach `self`.
    pub fn all(&self) -> HashMap<K, V> {
        self.entries
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V> Default for ConcurrentMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ConcurrentMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentMap")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for ConcurrentMap<K, V>
where
    K: Hash + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.add_batch(iter);
    }
}

impl<K, V> FromIterator<(K, V)> for ConcurrentMap<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<K, V> From<HashMap<K, V>> for ConcurrentMap<K, V>
where
    K: Hash + Eq,
{
    fn from(entries: HashMap<K, V>) -> Self {
        Self::from_map(entries.into_iter().collect())
    }
}

impl<K, V> MetricsCollector for ConcurrentMap<K, V> {
    fn metrics(&self) -> PerformanceMetrics {
        self.metrics.snapshot()
    }

    fn reset_metrics(&self) {
        self.metrics.reset();
    }

    fn set_metrics_enabled(&self, enabled: bool) {
        self.metrics.set_enabled(enabled);
    }

    fn is_metrics_enabled(&self) -> bool {
        self.metrics.is_enabled()
    }
}
