mod azure_whisper_engine;
mod http_response;
mod mock_transcription_engine;
mod openai_whisper_engine;
mod transcription_engine_factory;

pub use azure_whisper_engine::{AZURE_DEFAULT_API_VERSION, AzureWhisperEngine};
pub use mock_transcription_engine::MockTranscriptionEngine;
pub use openai_whisper_engine::{OPENAI_DEFAULT_BASE_URL, OPENAI_DEFAULT_MODEL, OpenAiWhisperEngine};
pub use transcription_engine_factory::{
    EngineOptions, TranscriptionEngineFactory, TranscriptionProvider,
};
