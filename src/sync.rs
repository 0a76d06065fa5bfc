//! Lock selection
//!
//! Every container in this crate is guarded by exactly one reader/writer lock.
//! Normal builds use [`parking_lot::RwLock`], which has no poisoning and hands
//! guards out directly. Building with `RUSTFLAGS="--cfg loom"` swaps in
//! `loom::sync::RwLock` behind the same API so the container code itself is
//! model-checked.

#[cfg(not(loom))]
pub(crate) use parking_lot::{RwLock, RwLockWriteGuard};

#[cfg(loom)]
pub(crate) use self::loom_lock::{RwLock, RwLockWriteGuard};

#[cfg(loom)]
mod loom_lock {
    use std::sync::PoisonError;

    pub(crate) use loom::sync::{RwLockReadGuard, RwLockWriteGuard};

    /// `loom::sync::RwLock` with the `parking_lot` calling convention.
    pub(crate) struct RwLock<T>(loom::sync::RwLock<T>);

    impl<T> RwLock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(loom::sync::RwLock::new(value))
        }

        // A panicking model thread fails the whole model anyway.
        pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
            self.0.read().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
            self.0.write().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
            self.0.try_write().ok()
        }
    }
}

/// Acquire the exclusive lock, calling `on_contention` first if another
/// thread currently holds it.
#[inline]
pub(crate) fn write_or_contend<T, F>(lock: &RwLock<T>, on_contention: F) -> RwLockWriteGuard<'_, T>
where
    F: FnOnce(),
{
    match lock.try_write() {
        Some(guard) => guard,
        None => {
            on_contention();
            lock.write()
        }
    }
}
