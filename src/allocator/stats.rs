//! Allocator statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics tracked by the allocator.
///
/// All fields are atomic and updated outside the registry lock, so
/// counting never lengthens the critical section.
///
/// # Memory Ordering
/// `Ordering::Relaxed` throughout: counters are independent and only need
/// atomicity, not ordering against each other.
///
/// # Example
/// ```
/// use pagepool::AllocatorStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = AllocatorStats::new();
/// stats.recycled.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.recycled.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct AllocatorStats {
    /// Acquisitions served from the free registry.
    pub recycled: AtomicU64,

    /// Acquisitions that had to allocate a fresh page.
    pub allocated: AtomicU64,

    /// Releases that returned at least one page.
    pub releases: AtomicU64,

    /// Pages moved back to the free registry by releases.
    pub pages_released: AtomicU64,

    /// Full resets performed.
    pub resets: AtomicU64,
}

impl AllocatorStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            recycled: AtomicU64::new(0),
            allocated: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            pages_released: AtomicU64::new(0),
            resets: AtomicU64::new(0),
        }
    }

    /// Fraction of acquisitions served by recycling (0.0 to 1.0).
    pub fn reuse_rate(&self) -> f64 {
        self.snapshot().reuse_rate()
    }

    /// Get a plain copy of the counters for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            recycled: self.recycled.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            pages_released: self.pages_released.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.recycled.store(0, Ordering::Relaxed);
        self.allocated.store(0, Ordering::Relaxed);
        self.releases.store(0, Ordering::Relaxed);
        self.pages_released.store(0, Ordering::Relaxed);
        self.resets.store(0, Ordering::Relaxed);
    }
}

impl Default for AllocatorStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of allocator statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub recycled: u64,
    pub allocated: u64,
    pub releases: u64,
    pub pages_released: u64,
    pub resets: u64,
}

impl StatsSnapshot {
    /// Total acquisitions counted.
    pub fn acquisitions(&self) -> u64 {
        self.recycled + self.allocated
    }

    /// Fraction of acquisitions served by recycling (0.0 to 1.0).
    pub fn reuse_rate(&self) -> f64 {
        let total = self.acquisitions();
        if total == 0 {
            0.0
        } else {
            self.recycled as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ recycled: {}, allocated: {}, released: {}, reuse_rate: {:.2}% }}",
            self.recycled,
            self.allocated,
            self.pages_released,
            self.reuse_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = AllocatorStats::new();
        assert_eq!(stats.recycled.load(Ordering::Relaxed), 0);
        assert_eq!(stats.allocated.load(Ordering::Relaxed), 0);
        assert_eq!(stats.reuse_rate(), 0.0);
    }

    #[test]
    fn test_stats_reuse_rate() {
        let stats = AllocatorStats::new();

        stats.recycled.fetch_add(3, Ordering::Relaxed);
        stats.allocated.fetch_add(1, Ordering::Relaxed);

        assert_eq!(stats.reuse_rate(), 0.75);
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = AllocatorStats::new();
        stats.recycled.fetch_add(7, Ordering::Relaxed);
        stats.allocated.fetch_add(3, Ordering::Relaxed);
        stats.pages_released.fetch_add(10, Ordering::Relaxed);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.acquisitions(), 10);
        assert_eq!(snapshot.pages_released, 10);
        assert_eq!(snapshot.reuse_rate(), 0.7);
    }

    #[test]
    fn test_stats_reset() {
        let stats = AllocatorStats::new();
        stats.recycled.fetch_add(100, Ordering::Relaxed);
        stats.resets.fetch_add(1, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.snapshot().acquisitions(), 0);
        assert_eq!(stats.resets.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = AllocatorStats::new();
        stats.recycled.fetch_add(80, Ordering::Relaxed);
        stats.allocated.fetch_add(20, Ordering::Relaxed);
        stats.pages_released.fetch_add(5, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("recycled: 80"));
        assert!(display.contains("allocated: 20"));
        assert!(display.contains("80.00%"));
    }
}
