use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::services::TranscriptionService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub settings: Settings,
    /// Cancelled on server shutdown; every request derives a child token from it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(transcription_service: Arc<TranscriptionService>, settings: Settings) -> Self {
        Self {
            transcription_service,
            settings,
            shutdown: CancellationToken::new(),
        }
    }
}
