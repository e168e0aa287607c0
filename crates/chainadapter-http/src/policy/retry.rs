//! Wait schedule between attempts of a [`Requester`](crate::Requester).

use std::time::Duration;

/// How the wait before each retry evolves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same wait before every retry.
    Fixed(Duration),
    /// `initial * multiplier^(n-1)` before retry `n`, never above `max`.
    Exponential {
        initial: Duration,
        max: Duration,
        multiplier: f64,
    },
}

/// Retry budget of one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff: Backoff,
}

/// Three attempts one second apart.
impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Backoff::Fixed(Duration::from_millis(1_000)),
        }
    }
}

impl RetryConfig {
    /// Wait before retry number `retry` (1-based), or `None` once the
    /// budget is spent.
    pub fn delay_before(&self, retry: u32) -> Option<Duration> {
        if retry == 0 || retry > self.max_retries {
            return None;
        }
        let delay = match self.backoff {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential {
                initial,
                max,
                multiplier,
            } => {
                let grown = initial.as_millis() as f64 * multiplier.powi(retry as i32 - 1);
                // float -> int casts saturate, so huge exponents land on `max`
                Duration::from_millis(grown.min(max.as_millis() as f64) as u64)
            }
        };
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_attempts_a_second_apart() {
        let cfg = RetryConfig::default();
        assert_eq!(cfg.delay_before(1), Some(Duration::from_secs(1)));
        assert_eq!(cfg.delay_before(2), Some(Duration::from_secs(1)));
        assert_eq!(cfg.delay_before(3), None);
    }

    #[test]
    fn exponential_doubles_up_to_cap() {
        let cfg = RetryConfig {
            max_retries: 5,
            backoff: Backoff::Exponential {
                initial: Duration::from_millis(250),
                max: Duration::from_millis(1_500),
                multiplier: 2.0,
            },
        };
        let delays: Vec<u128> = (1..=5)
            .filter_map(|n| cfg.delay_before(n))
            .map(|d| d.as_millis())
            .collect();
        assert_eq!(delays, vec![250, 500, 1_000, 1_500, 1_500]);
    }

    #[test]
    fn runaway_growth_saturates_at_cap() {
        let cfg = RetryConfig {
            max_retries: u32::MAX,
            backoff: Backoff::Exponential {
                initial: Duration::from_secs(1),
                max: Duration::from_secs(10),
                multiplier: 1e6,
            },
        };
        assert_eq!(cfg.delay_before(4_000), Some(Duration::from_secs(10)));
    }

    #[test]
    fn zero_budget_never_waits() {
        let cfg = RetryConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert_eq!(cfg.delay_before(0), None);
        assert_eq!(cfg.delay_before(1), None);
    }
}
