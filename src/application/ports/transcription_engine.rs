use std::fmt;

use async_trait::async_trait;

use crate::domain::{AudioUpload, Transcript};

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio: &AudioUpload) -> Result<Transcript, TranscriptionError>;

    fn name(&self) -> &'static str;
}

/// A well-formed error response from the transcription service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRejection {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
}

impl fmt::Display for RemoteRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}: {}", self.status, self.body)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("remote service rejected request: {0}")]
    Rejected(RemoteRejection),
    #[error("invalid transcription request: {0}")]
    InvalidRequest(String),
    #[error("malformed transcription response: {0}")]
    MalformedResponse(String),
    #[error("transcription engine misconfigured: {0}")]
    Configuration(String),
}

impl TranscriptionError {
    /// Only transport failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, TranscriptionError::Transport(_))
    }
}
