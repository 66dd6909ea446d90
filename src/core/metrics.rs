//! Engine counters for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters tracking engine activity.
///
/// The record pool's overwrite-on-overload is deliberately absent here:
/// slot recycling is not detected, so it cannot be counted.
#[derive(Debug)]
pub struct EngineMetrics {
    /// Records accepted by the emit path
    records_emitted: AtomicU64,
    /// Records handed to the sink registry for delivery
    records_delivered: AtomicU64,
    /// Failed or panicked sink invocations
    sink_failures: AtomicU64,
    /// Explicit flush requests
    flush_requests: AtomicU64,
}

impl EngineMetrics {
    pub const fn new() -> Self {
        Self {
            records_emitted: AtomicU64::new(0),
            records_delivered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            flush_requests: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.records_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered_count(&self) -> u64 {
        self.records_delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failure_count(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_count(&self) -> u64 {
        self.flush_requests.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.records_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.records_delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failures(&self, count: u64) -> u64 {
        self.sink_failures.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flush_requests.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.records_emitted.store(0, Ordering::Relaxed);
        self.records_delivered.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.flush_requests.store(0, Ordering::Relaxed);
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}
