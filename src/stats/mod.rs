//! Thread-safe run statistics
//!
//! One [`RunStats`] is created per run with a fixed target total, shared by
//! every fetch worker through an `Arc`, and read once after the scheduler's
//! completion barrier. Each counter update is an independent atomic; relaxed
//! ordering is sufficient because nothing reads across counters until the
//! barrier has ordered all worker writes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Shared counter set mutated concurrently by fetch workers
#[derive(Debug)]
pub struct RunStats {
    total: u64,
    succeeded: AtomicU64,
    warnings: AtomicU64,
    failed: AtomicU64,
    total_bytes: AtomicU64,
    started: Instant,
}

impl RunStats {
    /// Creates a counter set for a run over `total` targets
    pub fn new(total: u64) -> Self {
        Self {
            total,
            succeeded: AtomicU64::new(0),
            warnings: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            total_bytes: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn incr_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_warning(&self) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_bytes(&self, n: u64) {
        self.total_bytes.fetch_add(n, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Reads all counters
    ///
    /// Consistent across fields only after every worker has finished; a
    /// mid-run read is fine for progress peeking but makes no cross-field
    /// guarantee.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total,
            succeeded: self.succeeded.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            total_bytes: self.total_bytes.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }
}

/// Point-in-time view of the run counters
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub total: u64,
    pub succeeded: u64,
    pub warnings: u64,
    pub failed: u64,
    pub total_bytes: u64,
    pub elapsed: Duration,
}

impl StatsSnapshot {
    /// Success rate as a percentage, 0.0 for an empty run
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total as f64 * 100.0
        }
    }

    /// Total bytes written, in megabytes
    pub fn megabytes(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0)
    }
}
