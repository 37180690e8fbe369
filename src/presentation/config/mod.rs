mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, RetrySettings, ServerSettings, Settings, SettingsError,
    TranscriptionSettings, UploadSettings,
};
