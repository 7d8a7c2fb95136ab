//! Retry policy for transient transport failures.

use std::time::Duration;

use rand::Rng;

/// Configuration for retrying transient network failures.
///
/// Backoff is linear in the retry number with a small random jitter and a
/// hard cap: the delay before retry `n` is `n * base_delay` plus a random
/// jitter in `[0, max_jitter]`, never exceeding `max_delay`. Only
/// transient failure kinds (connect, DNS, timeout, TLS handshake) are
/// retried; HTTP error responses and malformed bodies never retry.
///
/// # Defaults
///
/// - `max_retries`: 3
/// - `base_delay`: 500 milliseconds
/// - `max_jitter`: 100 milliseconds
/// - `max_delay`: 2 seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    ///
    /// A value of 0 disables retries.
    pub max_retries: u32,

    /// Delay multiplier per retry number.
    pub base_delay: Duration,

    /// Upper bound of the random jitter added to each delay.
    pub max_jitter: Duration,

    /// Hard cap on any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Default maximum number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default per-retry delay step (500 milliseconds).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

    /// Default jitter upper bound (100 milliseconds).
    pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(100);

    /// Default delay cap (2 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(2000);

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_jitter: Self::DEFAULT_MAX_JITTER,
            max_delay: Self::DEFAULT_MAX_DELAY,
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the per-retry delay step.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the jitter upper bound.
    #[must_use]
    pub const fn with_max_jitter(mut self, jitter: Duration) -> Self {
        self.max_jitter = jitter;
        self
    }

    /// Sets the hard delay cap.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Returns true if another retry is allowed after `retries_so_far`
    /// retries have already been made.
    #[must_use]
    pub const fn should_retry(&self, retries_so_far: u32) -> bool {
        retries_so_far < self.max_retries
    }

    /// Computes the delay before the given retry (1-indexed).
    ///
    /// Includes the random jitter and applies the cap.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let base = self.base_delay.saturating_mul(retry);
        let jitter_bound = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        let jitter = if jitter_bound == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_bound))
        };

        base.saturating_add(jitter).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.max_jitter, Duration::from_millis(100));
        assert_eq!(policy.max_delay, Duration::from_millis(2000));
    }

    #[test]
    fn should_retry_respects_budget() {
        let policy = RetryPolicy::new().with_max_retries(3);

        assert!(policy.should_retry(0));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
        assert!(!policy.should_retry(4));
    }

    #[test]
    fn zero_retries_disables_retrying() {
        let policy = RetryPolicy::new().with_max_retries(0);

        assert!(!policy.should_retry(0));
    }

    #[test]
    fn delay_stays_within_jitter_bounds() {
        let policy = RetryPolicy::new();

        for retry in 1..=3 {
            let delay = policy.delay_for_retry(retry);
            let base = Duration::from_millis(500 * u64::from(retry));

            assert!(delay >= base, "retry {retry}: {delay:?} below base {base:?}");
            assert!(
                delay <= base + Duration::from_millis(100),
                "retry {retry}: {delay:?} above base plus jitter"
            );
        }
    }

    #[test]
    fn delay_is_capped() {
        let policy = RetryPolicy::new();

        // Retry 10 would be 5s before the cap.
        assert_eq!(policy.delay_for_retry(10), Duration::from_millis(2000));
    }

    #[test]
    fn zero_jitter_is_deterministic() {
        let policy = RetryPolicy::new().with_max_jitter(Duration::ZERO);

        assert_eq!(policy.delay_for_retry(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(1000));
    }
}
