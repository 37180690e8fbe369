use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::azure_whisper_engine::{AZURE_DEFAULT_API_VERSION, AzureWhisperEngine};
use super::mock_transcription_engine::MockTranscriptionEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Mock,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: Option<String>,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: TranscriptionProvider,
        options: EngineOptions,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            TranscriptionProvider::OpenAi => {
                let key = required(
                    options.api_key.clone(),
                    "API key required for OpenAI Whisper",
                )?;
                let client = build_client(&options)?;
                let engine =
                    OpenAiWhisperEngine::with_client(client, key, options.base_url, options.model);
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::Azure => {
                let key = required(
                    options.api_key.clone(),
                    "API key required for Azure Whisper",
                )?;
                let endpoint = required(
                    options.azure_endpoint.clone(),
                    "endpoint required for Azure Whisper",
                )?;
                let deployment = required(
                    options.azure_deployment.clone(),
                    "deployment required for Azure Whisper",
                )?;
                let api_version = options
                    .azure_api_version
                    .clone()
                    .unwrap_or_else(|| AZURE_DEFAULT_API_VERSION.to_string());
                let client = build_client(&options)?;
                let engine = AzureWhisperEngine::with_client(
                    client,
                    &endpoint,
                    &deployment,
                    &key,
                    &api_version,
                );
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::Mock => Ok(Arc::new(MockTranscriptionEngine::new())),
        }
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, TranscriptionError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| TranscriptionError::Configuration(message.to_string()))
}

fn build_client(options: &EngineOptions) -> Result<reqwest::Client, TranscriptionError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = options.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| TranscriptionError::Configuration(format!("http client: {}", e)))
}
