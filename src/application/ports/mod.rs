mod sleeper;
mod transcription_engine;

pub use sleeper::Sleeper;
pub use transcription_engine::{RemoteRejection, TranscriptionEngine, TranscriptionError};
