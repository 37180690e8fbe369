use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::application::ports::Sleeper;

/// Sleeper that returns immediately and remembers every requested delay.
///
/// With [`RecordingSleeper::cancelling`] the first sleep cancels the given token
/// and then never completes, which simulates a caller going away mid-wait.
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
    cancel_on_sleep: Option<CancellationToken>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancelling(token: CancellationToken) -> Self {
        Self {
            delays: Mutex::new(Vec::new()),
            cancel_on_sleep: Some(token),
        }
    }

    pub fn delays(&self) -> Vec<Duration> {
        match self.delays.lock() {
            Ok(delays) => delays.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn total(&self) -> Duration {
        self.delays().into_iter().sum()
    }

    fn record(&self, duration: Duration) {
        match self.delays.lock() {
            Ok(mut delays) => delays.push(duration),
            Err(poisoned) => poisoned.into_inner().push(duration),
        }
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.record(duration);

        if let Some(token) = &self.cancel_on_sleep {
            token.cancel();
            std::future::pending::<()>().await;
        }
    }
}
