//! Set implementations
//!
//! This module provides the thread-safe deduplicated set.
//!
//! ## Available Sets
//!
//! - [`ConcurrentSet`]: unique values behind a single reader/writer lock
//!
//! ## Guarantees
//!
//! - **No duplicates**: adding a present value is a no-op
//! - **Linearizable**: each call appears to happen atomically
//! - **Snapshots**: [`ConcurrentSet::all`] always returns an owned copy
//! - **No ordering**: neither `pop` nor `all` promise any order
pub mod concurrent;

pub use self::concurrent::ConcurrentSet;


#[cfg(all(test, not(loom)))]
mod proptests;
