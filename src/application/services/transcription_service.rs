use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AttemptPolicy, AudioUpload, CallFailure, Transcript};

use super::{RetryError, RetryExecutor};

pub type TranscriptionResult = Result<Transcript, RetryError<TranscriptionError>>;

pub struct TranscriptionService {
    engine: Arc<dyn TranscriptionEngine>,
    executor: RetryExecutor,
    policy: AttemptPolicy,
}

impl TranscriptionService {
    pub fn new(
        engine: Arc<dyn TranscriptionEngine>,
        executor: RetryExecutor,
        policy: AttemptPolicy,
    ) -> Self {
        Self {
            engine,
            executor,
            policy,
        }
    }

    pub fn policy(&self) -> &AttemptPolicy {
        &self.policy
    }

    #[tracing::instrument(
        skip(self, audio, cancel),
        fields(
            engine = self.engine.name(),
            filename = %audio.filename,
            bytes = audio.size_bytes()
        )
    )]
    pub async fn transcribe(
        &self,
        audio: &AudioUpload,
        cancel: &CancellationToken,
    ) -> TranscriptionResult {
        let result = self
            .executor
            .execute(&self.policy, cancel, || async {
                self.engine.transcribe(audio).await.map_err(classify)
            })
            .await;

        if let Ok(transcript) = &result {
            tracing::info!(chars = transcript.char_count(), "Transcription completed");
        }

        result
    }
}

fn classify(error: TranscriptionError) -> CallFailure<TranscriptionError> {
    if error.is_transient() {
        CallFailure::Transient(error)
    } else {
        CallFailure::Rejected(error)
    }
}
