/// Terminal outcome of a retried call that did not succeed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RetryError<E> {
    #[error("remote service rejected the request on attempt {attempts}: {error}")]
    Rejected { attempts: u32, error: E },
    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: E },
    #[error("cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

impl<E> RetryError<E> {
    /// Number of times the operation was invoked before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Rejected { attempts, .. }
            | RetryError::Exhausted { attempts, .. }
            | RetryError::Cancelled { attempts } => *attempts,
        }
    }
}
