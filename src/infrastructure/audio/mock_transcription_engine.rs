use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AudioUpload, Transcript};

/// Engine that replays scripted outcomes in order and counts invocations.
///
/// Once the script runs dry every further call returns the fallback transcript.
pub struct MockTranscriptionEngine {
    script: Mutex<VecDeque<Result<Transcript, TranscriptionError>>>,
    fallback: Transcript,
    calls: AtomicUsize,
}

impl MockTranscriptionEngine {
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(outcomes: Vec<Result<Transcript, TranscriptionError>>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            fallback: Transcript::new("Mock transcript"),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTranscriptionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, _audio: &AudioUpload) -> Result<Transcript, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };

        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
