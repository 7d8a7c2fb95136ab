//! Time abstractions for testability.
//!
//! This module provides a [`Clock`] trait for reading the current time and a
//! [`Sleeper`] trait for waiting between retry attempts. Both allow tests to
//! inject controlled implementations instead of relying on the system clock
//! or real delays.

use std::time::{Duration, SystemTime};

/// Abstraction over system time for testability.
///
/// Implementations provide the current time, allowing tests to inject
/// controlled time values instead of relying on actual system time.
///
/// # Example
///
/// ```
/// use tahsilat::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as seconds since the Unix epoch.
    ///
    /// Pre-epoch times map to 0.
    fn unix_seconds(&self) -> i64 {
        self.now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Production clock using actual system time.
///
/// This is the default clock implementation that delegates to
/// [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Abstraction over sleeping for retry delays.
///
/// Production code uses [`TokioSleeper`]; tests use [`InstantSleeper`]
/// to exercise retry loops without real delays.
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful in tests that drive retry loops without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
pub(crate) mod test_clock {
    //! Controlled clock shared by unit tests.

    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::{Duration, SystemTime};

    use super::Clock;

    /// A mock clock that returns controlled time values.
    pub struct MockClock {
        /// Seconds since `UNIX_EPOCH`, atomically updated.
        secs: AtomicI64,
    }

    impl MockClock {
        pub fn new(initial_secs: i64) -> Self {
            Self {
                secs: AtomicI64::new(initial_secs),
            }
        }

        pub fn advance(&self, secs: i64) {
            self.secs.fetch_add(secs, Ordering::SeqCst);
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> SystemTime {
            let secs = self.secs.load(Ordering::SeqCst);
            SystemTime::UNIX_EPOCH + Duration::from_secs(u64::try_from(secs).unwrap_or(0))
        }
    }
}
