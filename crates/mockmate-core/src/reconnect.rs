//! Reconnect timing for the interview channel.
//!
//! The channel is re-established after an abnormal closure with an
//! exponentially growing delay, capped at `max_delay`, for at most
//! `max_attempts` consecutive attempts.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconnectPolicy {
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 2.0, Duration::from_secs(60), 8)
    }
}

impl ReconnectPolicy {
    pub fn new(
        initial_delay: Duration,
        multiplier: f64,
        max_delay: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            initial_delay,
            multiplier: if multiplier.is_finite() && multiplier >= 1.0 {
                multiplier
            } else {
                1.0
            },
            max_delay: max_delay.max(initial_delay),
            max_attempts,
        }
    }

    /// A fixed delay with no growth.
    pub fn fixed(delay: Duration, max_attempts: u32) -> Self {
        Self::new(delay, 1.0, delay, max_attempts)
    }

    /// Delay before the given 1-based attempt, or `None` once the attempts
    /// are exhausted.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let factor = self.multiplier.powi(exponent);
        let millis = self.initial_delay.as_millis() as f64 * factor;
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Some(Duration::from_millis(capped as u64))
    }

    pub fn backoff(&self) -> Backoff {
        Backoff {
            policy: *self,
            attempt: 0,
        }
    }
}

/// Consecutive-attempt counter over a [`ReconnectPolicy`].
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: ReconnectPolicy,
    attempt: u32,
}

impl Backoff {
    /// Advances to the next attempt and returns its delay.
    pub fn next_delay(&mut self) -> Option<Duration> {
        let next = self.attempt.checked_add(1)?;
        let delay = self.policy.delay_for(next)?;
        self.attempt = next;
        Some(delay)
    }

    /// Called after a successful open.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_first_delay_is_five_seconds() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for(1), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for(2), Some(Duration::from_secs(10)));
        assert_eq!(policy.delay_for(3), Some(Duration::from_secs(20)));
        assert_eq!(policy.delay_for(4), Some(Duration::from_secs(40)));
        assert_eq!(policy.delay_for(5), Some(Duration::from_secs(60)));
        assert_eq!(policy.delay_for(8), Some(Duration::from_secs(60)));
        assert_eq!(policy.delay_for(9), None);
    }

    #[test]
    fn test_backoff_resets_after_success() {
        let mut backoff = ReconnectPolicy::fixed(Duration::from_secs(5), 2).backoff();
        assert_eq!(backoff.next_delay(), Some(Duration::from_secs(5)));
        assert_eq!(backoff.next_delay(), Some(Duration::from_secs(5)));
        assert_eq!(backoff.next_delay(), None);
        assert_eq!(backoff.attempt(), 2);

        backoff.reset();
        assert_eq!(backoff.next_delay(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_multiplier_falls_back_to_fixed() {
        let policy = ReconnectPolicy::new(
            Duration::from_secs(1),
            0.5,
            Duration::from_secs(10),
            3,
        );
        assert_eq!(policy.delay_for(3), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_huge_attempt_counts_stay_capped() {
        let policy = ReconnectPolicy::new(
            Duration::from_secs(5),
            2.0,
            Duration::from_secs(60),
            u32::MAX,
        );
        assert_eq!(policy.delay_for(u32::MAX), Some(Duration::from_secs(60)));
        assert_eq!(
            policy.delay_for(i32::MAX as u32 + 2),
            Some(Duration::from_secs(60))
        );

        let fixed = ReconnectPolicy::fixed(Duration::from_secs(5), u32::MAX);
        assert_eq!(fixed.delay_for(u32::MAX), Some(Duration::from_secs(5)));
    }
}
