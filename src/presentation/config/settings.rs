use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::{
    AttemptPolicy, AttemptPolicyError, DEFAULT_ACCEPTED_CONTENT_TYPE, DEFAULT_BACKOFF_MULTIPLIER,
    DEFAULT_MAX_ATTEMPTS,
};
use crate::infrastructure::audio::{
    EngineOptions, OPENAI_DEFAULT_MODEL, TranscriptionProvider,
};

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub transcription: TranscriptionSettings,
    pub retry: RetrySettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub azure_endpoint: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub max_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
    pub accepted_content_types: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    #[error("invalid retry settings: {0}")]
    Retry(#[from] AttemptPolicyError),
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{env}.toml` and `APP_*` variables.
    ///
    /// Nested keys use a double underscore, e.g. `APP_RETRY__MAX_ATTEMPTS=5`.
    /// `OPENAI_API_KEY` fills in the key when none was configured.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());

        let configuration = Self::with_defaults(Config::builder())?
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("upload.accepted_content_types")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;

        if settings.transcription.api_key.is_none() {
            settings.transcription.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        settings.retry.to_policy()?;

        Ok(settings)
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .set_default("transcription.provider", "openai")?
            .set_default("transcription.model", OPENAI_DEFAULT_MODEL)?
            .set_default("transcription.connect_timeout_secs", 10_i64)?
            .set_default("transcription.request_timeout_secs", 120_i64)?
            .set_default("retry.max_attempts", i64::from(DEFAULT_MAX_ATTEMPTS))?
            .set_default("retry.initial_delay_ms", 1000_i64)?
            .set_default("retry.backoff_multiplier", DEFAULT_BACKOFF_MULTIPLIER)?
            .set_default("upload.max_file_size_mb", 25_i64)?
            .set_default(
                "upload.accepted_content_types",
                vec![DEFAULT_ACCEPTED_CONTENT_TYPE],
            )
    }
}

impl RetrySettings {
    pub fn to_policy(&self) -> Result<AttemptPolicy, AttemptPolicyError> {
        let policy = AttemptPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_delay_ms),
            self.backoff_multiplier,
        )?;

        Ok(match self.max_delay_ms {
            Some(ms) => policy.with_max_delay(Duration::from_millis(ms)),
            None => policy,
        })
    }
}

impl TranscriptionSettings {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: Some(self.model.clone()),
            azure_endpoint: self.azure_endpoint.clone(),
            azure_deployment: self.azure_deployment.clone(),
            azure_api_version: self.azure_api_version.clone(),
            connect_timeout: Some(Duration::from_secs(self.connect_timeout_secs)),
            request_timeout: Some(Duration::from_secs(self.request_timeout_secs)),
        }
    }
}

impl UploadSettings {
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}
