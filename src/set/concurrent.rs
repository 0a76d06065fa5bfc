//! Concurrent Set Implementation
//!
//! This module implements a deduplicated set that can be shared between
//! threads without any external synchronization.
//!
//! ## Design
//!
//! The set uses:
//! - A single `IndexSet` owned by the instance, so removing an arbitrary
//!   value is a constant-time `pop` of the last slot
//! - One reader/writer lock guarding every access to it
//! - Copy-on-read for bulk access, so callers never hold references into the
//!   guarded container after a call returns
//!
//! ## Locking
//!
//! - `contains`, `len`, `is_empty` and `all` take the shared lock
//! - `add`, `pop`, `remove`, `clear` and the batch operations take the
//!   exclusive lock
//! - No operation waits for data to appear: `pop` on an empty set fails
//!   immediately with [`Error::Empty`]
//!
//! ## Example
//!
//! ```rust
//! use concurrent_store::ConcurrentSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(ConcurrentSet::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|i| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || set.add(i))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(set.len(), 4);
//! assert!(set.contains(&2));
//! ```

use crate::metrics::{AtomicMetrics, MetricsCollector, PerformanceMetrics};
use crate::sync::{write_or_contend, RwLock, RwLockWriteGuard};
use crate::{Error, Result};
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use indexmap::IndexSet;
use std::collections::HashSet;
use std::time::Instant;

/// A thread-safe set of unique values
///
/// All state lives behind one reader/writer lock. Readers run in parallel with
/// each other, writers are serialized against everything.
///
/// # Type Parameters
///
/// * `T` - The element type, must implement `Eq + Hash`. Only snapshots
///   additionally need `Clone`.
///
/// # Examples
///
/// ```rust
/// use concurrent_store::{ConcurrentSet, Error};
///
/// let set = ConcurrentSet::new();
/// assert_eq!(set.pop(), Err(Error::Empty));
///
/// set.add("foo");
/// assert!(set.contains("foo"));
/// assert!(!set.contains("bar"));
/// ```
pub struct ConcurrentSet<T> {
    items: RwLock<IndexSet<T>>,
    metrics: AtomicMetrics,
}

impl<T> ConcurrentSet<T> {
    /// Create a new, empty set
    pub fn new() -> Self {
        Self::from_set(IndexSet::new())
    }

    /// Create a new, empty set able to hold at least `capacity` values
    /// without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_set(IndexSet::with_capacity(capacity))
    }

    fn from_set(items: IndexSet<T>) -> Self {
        let metrics = AtomicMetrics::default();
        metrics.update_len(items.len());
        Self {
            items: RwLock::new(items),
            metrics,
        }
    }

    /// Number of values currently in the set
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the set currently has no values
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Remove every value
    pub fn clear(&self) {
        let mut items = self.write();
        if !items.is_empty() {
            log::debug!("clearing set with {} values", items.len());
        }
        items.clear();
        self.metrics.update_len(0);
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexSet<T>> {
        write_or_contend(&self.items, || self.metrics.record_contention())
    }
}

impl<T> ConcurrentSet<T>
where
    T: Eq + Hash,
{
    /// Insert a value
    ///
    /// Adding a value that is already present leaves the set unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concurrent_store::ConcurrentSet;
    ///
    /// let set = ConcurrentSet::new();
    /// set.add(1);
    /// set.add(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&self, value: T) {
        let start = Instant::now();
        {
            let mut items = self.write();
            items.insert(value);
            self.metrics.update_len(items.len());
        }
        self.metrics.record_success(start.elapsed());
    }

    /// Whether `value` is currently a member
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.read().contains(value)
    }

    /// Remove a specific value, returning whether it was present
    pub fn remove<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let start = Instant::now();
        let removed = {
            let mut items = self.write();
            let removed = items.swap_remove(value);
            self.metrics.update_len(items.len());
            removed
        };

        if removed {
            self.metrics.record_success(start.elapsed());
        } else {
            self.metrics.record_failure();
        }
        removed
    }

    /// Insert many values under a single lock acquisition
    ///
    /// Returns how many of them were not already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concurrent_store::ConcurrentSet;
    ///
    /// let set = ConcurrentSet::new();
    /// set.add(2);
    /// assert_eq!(set.add_batch(vec![1, 2, 3]), 2);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn add_batch<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let start = Instant::now();
        let inserted = {
            let mut items = self.write();
            let inserted = values
                .into_iter()
                .fold(0, |count, value| count + usize::from(items.insert(value)));
            self.metrics.update_len(items.len());
            inserted
        };
        self.metrics.record_success(start.elapsed());
        inserted
    }

    /// Remove and return an arbitrary value
    ///
    /// Which value is returned when several are present is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the set has no values at the time of the
    /// call. The call never waits for a value to arrive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concurrent_store::{ConcurrentSet, Error};
    ///
    /// let set = ConcurrentSet::new();
    /// set.add("foo");
    /// assert_eq!(set.pop(), Ok("foo"));
    /// assert_eq!(set.pop(), Err(Error::Empty));
    /// ```
    pub fn pop(&self) -> Result<T> {
        let start = Instant::now();
        let popped = {
            let mut items = self.write();
            let popped = items.pop();
            self.metrics.update_len(items.len());
            popped
        };

        match popped {
            Some(value) => {
                self.metrics.record_success(start.elapsed());
                Ok(value)
            }
            None => {
                log::trace!("pop on empty set");
                self.metrics.record_failure();
                Err(Error::Empty)
            }
        }
    }

    /// Remove and return up to `max` arbitrary values under a single lock
    /// acquisition
    ///
    /// Returns an empty vector when the set is empty.
    pub fn pop_batch(&self, max: usize) -> Vec<T> {
        let start = Instant::now();
        let (was_empty, popped) = {
            let mut items = self.write();
            let was_empty = items.is_empty();
            let count = max.min(items.len());
            let popped: Vec<T> = (0..count).filter_map(|_| items.pop()).collect();
            self.metrics.update_len(items.len());
            (was_empty, popped)
        };

        if was_empty {
            log::trace!("pop_batch on empty set");
            self.metrics.record_failure();
        } else {
            self.metrics.record_success(start.elapsed());
        }
        popped
    }
}

impl<T> ConcurrentSet<T>
where
    T: Eq + Hash + Clone,
{
    /// Snapshot of every value currently in the set
    ///
    /// The returned set is an independent copy: later changes to `self` do
    /// not show up in it, and changes to it do not reach `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use concurrent_store::ConcurrentSet;
    ///
    /// let set = ConcurrentSet::new();
    /// set.add("foo");
    /// let mut snapshot = set.all();
    /// set.add("bar");
    /// snapshot.insert("baz");
    ///
    /// assert_eq!(snapshot.len(), 2);
    /// assert!(!set.contains("baz"));
    /// ```
    pub fn all(&self) -> HashSet<T> {
        self.items.read().iter().cloned().collect()
    }
}

impl<T> Default for ConcurrentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ConcurrentSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentSet")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> Extend<T> for ConcurrentSet<T>
where
    T: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_batch(iter);
    }
}

impl<T> FromIterator<T> for ConcurrentSet<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl<T> From<HashSet<T>> for ConcurrentSet<T>
where
    T: Eq + Hash,
{
    fn from(items: HashSet<T>) -> Self {
        Self::from_set(items.into_iter().collect())
    }
}

impl<T> MetricsCollector for ConcurrentSet<T> {
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
