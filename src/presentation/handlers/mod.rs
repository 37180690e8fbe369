mod health;
mod transcribe;

pub use health::{HealthResponse, health_handler};
pub use transcribe::{
    CANCELLED_MESSAGE, EMPTY_FILE_MESSAGE, ErrorResponse, INVALID_FORM_MESSAGE,
    MISSING_FILE_MESSAGE, RETRIES_EXHAUSTED_MESSAGE, TranscriptionResponse, transcribe_handler,
    transcription_response,
};
