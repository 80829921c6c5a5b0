//! Backoff schedules for retried requests.
//!
//! Which statuses are worth retrying is decided by [`crate::status`]; this
//! module only answers "how long to wait before attempt N, if at all".

use std::time::Duration;

/// Delay schedule applied between retried attempts.
///
/// The canonical policy for this suite is [`Backoff::standard`]:
/// exponential, starting at 500 ms, doubling, capped at 4 s, applied
/// uniformly to every retryable status. An earlier generation of the suite
/// used a flat delay limited to a status subset; the flat schedule survives
/// as [`Backoff::Fixed`] (tests want millisecond delays), the subset
/// special-casing does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Backoff {
    /// Never retry.
    #[default]
    None,

    /// Exponentially increasing delays: `initial_delay * 2^(attempt - 1)`,
    /// capped at `max_delay`.
    Exponential {
        /// Delay before the first retry.
        initial_delay: Duration,
        /// Upper bound for any single delay.
        max_delay: Duration,
        /// Number of retries after the initial attempt.
        max_retries: u32,
    },

    /// The same delay before every retry.
    Fixed {
        /// Delay between attempts.
        delay: Duration,
        /// Number of retries after the initial attempt.
        max_retries: u32,
    },
}

impl Backoff {
    /// The suite's default schedule: 500 ms doubling up to 4 s.
    pub fn standard(max_retries: u32) -> Self {
        Backoff::Exponential {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(4000),
            max_retries,
        }
    }

    /// Returns the delay before retry `attempt` (1-based), or `None` once
    /// retries are exhausted.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        match self {
            Backoff::None => None,
            Backoff::Exponential {
                initial_delay,
                max_delay,
                max_retries,
            } => {
                if attempt > *max_retries {
                    return None;
                }
                let multiplier = 2u32.saturating_pow(attempt.saturating_sub(1));
                let delay = initial_delay.saturating_mul(multiplier);
                Some(delay.min(*max_delay))
            }
            Backoff::Fixed { delay, max_retries } => {
                if attempt > *max_retries {
                    None
                } else {
                    Some(*delay)
                }
            }
        }
    }

    /// Number of retries this schedule allows after the initial attempt.
    pub fn max_retries(&self) -> u32 {
        match self {
            Backoff::None => 0,
            Backoff::Exponential { max_retries, .. } | Backoff::Fixed { max_retries, .. } => {
                *max_retries
            }
        }
    }
}
