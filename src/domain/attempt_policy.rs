use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// How many times a call may be tried and how long to wait in between.
///
/// `max_attempts` counts every try, the first one included. The wait after the
/// attempt with zero-based index `i` is `initial_delay * backoff_multiplier^i`,
/// clamped to `max_delay` when one is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    backoff_multiplier: f64,
    max_delay: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttemptPolicyError {
    #[error("max_attempts must be at least 1 (got {0})")]
    ZeroAttempts(u32),
    #[error("backoff_multiplier must be a finite number >= 1 (got {0})")]
    InvalidMultiplier(f64),
}

impl AttemptPolicy {
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        backoff_multiplier: f64,
    ) -> Result<Self, AttemptPolicyError> {
        if max_attempts == 0 {
            return Err(AttemptPolicyError::ZeroAttempts(max_attempts));
        }
        if !backoff_multiplier.is_finite() || backoff_multiplier < 1.0 {
            return Err(AttemptPolicyError::InvalidMultiplier(backoff_multiplier));
        }

        Ok(Self {
            max_attempts,
            initial_delay,
            backoff_multiplier,
            max_delay: None,
        })
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    pub fn max_delay(&self) -> Option<Duration> {
        self.max_delay
    }

    /// Delay to wait after the attempt with the given zero-based index failed.
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        let ceiling = self.max_delay.unwrap_or(Duration::MAX);
        let exponent = i32::try_from(attempt_index).unwrap_or(i32::MAX);
        let factor = self.backoff_multiplier.powi(exponent);

        Duration::try_from_secs_f64(self.initial_delay.as_secs_f64() * factor)
            .map(|delay| delay.min(ceiling))
            .unwrap_or(ceiling)
    }
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            max_delay: None,
        }
    }
}
