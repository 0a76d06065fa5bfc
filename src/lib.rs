//! # concurrent-store
//!
//! Thread-safe container primitives: a deduplicated set and a key-value map
//! that can be shared between threads without external synchronization.
//!
//! ## Features
//!
//! - **ConcurrentSet**: unique values with membership queries and arbitrary removal
//! - **ConcurrentMap**: key/value associations with overwrite-on-add and arbitrary removal
//! - **Operation metrics**: per-instance counters through [`MetricsCollector`]
//!
//! ## Locking
//!
//! Each instance owns exactly one reader/writer lock:
//! - Lookups (`contains`, `get`, `len`, `all`) share it
//! - Mutations (`add`, `pop`, `remove`, `clear`) hold it exclusively
//! - Bulk reads return owned snapshots, never references into the container
//! - Nothing blocks waiting for data; `pop` on an empty container returns
//!   [`Error::Empty`] right away
//!
//! ## Quick Start
//!
//! ```rust
//! use concurrent_store::{ConcurrentSet, Error};
//!
//! let set = ConcurrentSet::new();
//! assert_eq!(set.pop(), Err(Error::Empty));
//!
//! set.add("foo");
//! set.add("bar");
//! assert!(set.contains("foo"));
//! assert_eq!(set.all().len(), 2);
//!
//! let popped = set.pop()?;
//! assert!(!set.contains(popped));
//! # Ok::<(), Error>(())
//! ```
//!
//! ## Sharing
//!
//! Wrap an instance in [`std::sync::Arc`] to hand it to several threads. The
//! containers are `Send + Sync` whenever their element types are.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod map;
pub mod metrics;
pub mod set;
mod sync;


pub use crate::map::ConcurrentMap;
pub use crate::metrics::{MetricsCollector, PerformanceMetrics};
pub use crate::set::ConcurrentSet;

/// Error types for container operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// An arbitrary-removal operation found the container empty
    Empty,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Empty => write!(f, "store is empty"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for container operations
pub type Result<T> = core::result::Result<T, Error>;
