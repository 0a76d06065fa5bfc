//! Map implementations
//!
//! This module provides the thread-safe key-value map.
//!
//! ## Available Maps
//!
//! - [`ConcurrentMap`]: key/value pairs behind a single reader/writer lock
//!
//! ## Choosing between Set and Map
//!
//! - Use [`ConcurrentSet`](crate::set::ConcurrentSet) when the value itself
//!   is the identity
//! - Use `ConcurrentMap` when data hangs off a key; adding an existing key
//!   overwrites the previous value
pub mod concurrent;

pub use self::concurrent::ConcurrentMap;


#[cfg(all(test, not(loom)))]
mod proptests;
