//! Operation Metrics Module
//!
//! Every container in this crate counts its own operations: how many writes
//! succeeded, how many pops found nothing to remove, how often a writer had to
//! wait for the lock, and how long writes took. Counters are plain relaxed
//! atomics so recording never takes the container lock.

use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Point-in-time view of a container's counters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PerformanceMetrics {
    /// Total number of recorded operations
    pub total_operations: u64,
    /// Number of operations that changed or returned data
    pub successful_operations: u64,
    /// Number of operations that found nothing to act on
    pub failed_operations: u64,
    /// Number of writes that found the lock held and had to wait
    pub contended_operations: u64,
    /// Average operation time in nanoseconds
    pub avg_operation_time_ns: u64,
    /// Maximum operation time in nanoseconds
    pub max_operation_time_ns: u64,
    /// Number of entries after the most recent write
    pub len: usize,
    /// Largest number of entries observed
    pub peak_len: usize,
}

impl PerformanceMetrics {
    /// Calculate success rate as percentage
    pub fn success_rate(&self) -> f64 {
        Self::rate(self.successful_operations, self.total_operations)
    }

    /// Calculate contention rate as percentage
    pub fn contention_rate(&self) -> f64 {
        Self::rate(self.contended_operations, self.total_operations)
    }

    /// Calculate failure rate as percentage
    pub fn failure_rate(&self) -> f64 {
        Self::rate(self.failed_operations, self.total_operations)
    }

    /// Get average operation time as Duration
    pub fn avg_operation_time(&self) -> Duration {
        Duration::from_nanos(self.avg_operation_time_ns)
    }

    /// Get maximum operation time as Duration
    pub fn max_operation_time(&self) -> Duration {
        Duration::from_nanos(self.max_operation_time_ns)
    }

    fn rate(part: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }
}

/// Internal atomic counters shared by all containers
#[derive(Debug)]
pub(crate) struct AtomicMetrics {
    enabled: AtomicBool,
    total_operations: AtomicU64,
    successful_operations: AtomicU64,
    failed_operations: AtomicU64,
    contended_operations: AtomicU64,
    total_time_ns: AtomicU64,
    max_time_ns: AtomicU64,
    len: AtomicUsize,
    peak_len: AtomicUsize,
}

impl Default for AtomicMetrics {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            total_operations: AtomicU64::new(0),
            successful_operations: AtomicU64::new(0),
            failed_operations: AtomicU64::new(0),
            contended_operations: AtomicU64::new(0),
            total_time_ns: AtomicU64::new(0),
            max_time_ns: AtomicU64::new(0),
            len: AtomicUsize::new(0),
            peak_len: AtomicUsize::new(0),
        }
    }
}

impl AtomicMetrics {
    #[inline]
    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Record a successful operation with its duration
    pub(crate) fn record_success(&self, duration: Duration) {
        if !self.is_enabled() {
            return;
        }
        let duration_ns = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        self.total_operations.fetch_add(1, Ordering::Relaxed);
        self.successful_operations.fetch_add(1, Ordering::Relaxed);
        self.total_time_ns.fetch_add(duration_ns, Ordering::Relaxed);
        self.max_time_ns.fetch_max(duration_ns, Ordering::Relaxed);
    }

    /// Record an operation that found nothing to act on
    pub(crate) fn record_failure(&self) {
        if !self.is_enabled() {
            return;
        }
        self.total_operations.fetch_add(1, Ordering::Relaxed);
        self.failed_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a write that had to wait for the lock
    pub(crate) fn record_contention(&self) {
        if !self.is_enabled() {
            return;
        }
        self.contended_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Update the entry gauge; called with the write lock held
    ///
    /// The gauge mirrors container state, so it keeps tracking while
    /// collection is disabled.
    pub(crate) fn update_len(&self, len: usize) {
        self.len.store(len, Ordering::Relaxed);
        self.peak_len.fetch_max(len, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub(crate) fn snapshot(&self) -> PerformanceMetrics {
        let total_operations = self.total_operations.load(Ordering::Relaxed);
        let total_time = self.total_time_ns.load(Ordering::Relaxed);

        PerformanceMetrics {
            total_operations,
            successful_operations: self.successful_operations.load(Ordering::Relaxed),
            failed_operations: self.failed_operations.load(Ordering::Relaxed),
            contended_operations: self.contended_operations.load(Ordering::Relaxed),
            avg_operation_time_ns: total_time.checked_div(total_operations).unwrap_or(0),
            max_operation_time_ns: self.max_time_ns.load(Ordering::Relaxed),
            len: self.len.load(Ordering::Relaxed),
            peak_len: self.peak_len.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub(crate) fn reset(&self) {
        self.total_operations.store(0, Ordering::Relaxed);
        self.successful_operations.store(0, Ordering::Relaxed);
        self.failed_operations.store(0, Ordering::Relaxed);
        self.contended_operations.store(0, Ordering::Relaxed);
        self.total_time_ns.store(0, Ordering::Relaxed);
        self.max_time_ns.store(0, Ordering::Relaxed);
        // The len gauge reflects current state, only the peak starts over.
        self.peak_len
            .store(self.len.load(Ordering::Relaxed), Ordering::Relaxed);
        log::debug!("operation metrics reset");
    }
}

/// Trait for containers that collect operation metrics
pub trait MetricsCollector {
    /// Get current performance metrics
    fn metrics(&self) -> PerformanceMetrics;

    /// Reset all metrics
    fn reset_metrics(&self);

    /// Enable or disable metrics collection
    fn set_metrics_enabled(&self, enabled: bool);

    /// Check if metrics collection is enabled
    fn is_metrics_enabled(&self) -> bool;
}
