//! # Time Abstraction
//!
//! Millisecond timestamps plus the [`TimeSource`] port.
//!
//! No subsystem reads the wall clock directly: the payment ledger, the
//! subscription registry, and the expiry scheduler all take a `TimeSource`
//! at construction time so tests can drive classification and cooldown
//! logic with a deterministic clock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// One second in milliseconds.
pub const MILLIS_PER_SECOND: u64 = 1_000;

/// One hour in milliseconds.
pub const MILLIS_PER_HOUR: u64 = 3_600 * MILLIS_PER_SECOND;

/// One day in milliseconds.
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Converts whole days to milliseconds.
pub fn days(n: u32) -> u64 {
    u64::from(n) * MILLIS_PER_DAY
}

/// Converts whole hours to milliseconds.
pub fn hours(n: u32) -> u64 {
    u64::from(n) * MILLIS_PER_HOUR
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Manually driven time source for tests.
///
/// Exposed unconditionally (not `#[cfg(test)]`) because every subsystem's
/// tests and the unified integration suite need it.
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    /// Creates a mock clock frozen at `initial`.
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Advances the clock by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute timestamp.
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source() {
        let source = SystemTimeSource;
        let now = source.now();

        // Should be a reasonable timestamp (after year 2020)
        assert!(now > 1_577_836_800_000); // Jan 1, 2020 in ms
    }

    #[test]
    fn test_mock_time_source() {
        let source = MockTimeSource::new(1_000);
        assert_eq!(source.now(), 1_000);

        source.advance(500);
        assert_eq!(source.now(), 1_500);

        source.set(3_000);
        assert_eq!(source.now(), 3_000);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(days(1), MILLIS_PER_DAY);
        assert_eq!(days(3), 3 * 24 * 3_600 * 1_000);
        assert_eq!(hours(24), days(1));
    }
}
