mod retry_error;
mod retry_executor;
mod transcription_service;

pub use retry_error::RetryError;
pub use retry_executor::RetryExecutor;
pub use transcription_service::{TranscriptionResult, TranscriptionService};
