use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::Sleeper;
use crate::domain::{AttemptPolicy, CallFailure};

use super::RetryError;

/// Runs a remote operation under an [`AttemptPolicy`].
///
/// Transient failures are retried with exponential backoff until the policy
/// runs out of attempts. Rejections end the invocation right away. The wait
/// between attempts goes through the injected [`Sleeper`] and is abandoned as
/// soon as the cancellation token fires.
#[derive(Clone)]
pub struct RetryExecutor {
    sleeper: Arc<dyn Sleeper>,
}

impl RetryExecutor {
    pub fn new(sleeper: Arc<dyn Sleeper>) -> Self {
        Self { sleeper }
    }

    pub async fn execute<T, E, Op, Fut>(
        &self,
        policy: &AttemptPolicy,
        cancel: &CancellationToken,
        mut operation: Op,
    ) -> Result<T, RetryError<E>>
    where
        E: Display,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CallFailure<E>>>,
    {
        let max_attempts = policy.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                tracing::info!(attempts = attempt, "Call cancelled before next attempt");
                return Err(RetryError::Cancelled { attempts: attempt });
            }

            attempt += 1;

            let error = match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "Call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(CallFailure::Rejected(error)) => {
                    tracing::warn!(attempt, error = %error, "Call rejected, not retrying");
                    return Err(RetryError::Rejected {
                        attempts: attempt,
                        error,
                    });
                }
                Err(CallFailure::Transient(error)) => error,
            };

            if attempt >= max_attempts {
                tracing::error!(
                    attempts = attempt,
                    error = %error,
                    "Transient failures exhausted all attempts"
                );
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }

            let delay = policy.delay_after(attempt - 1);
            tracing::warn!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Transient failure, retrying after backoff"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(attempts = attempt, "Call cancelled while waiting to retry");
                    return Err(RetryError::Cancelled { attempts: attempt });
                }
                _ = self.sleeper.sleep(delay) => {}
            }
        }
    }
}
