use std::time::Duration;

use async_trait::async_trait;

/// Suspends the calling task for a while without holding a worker thread.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
