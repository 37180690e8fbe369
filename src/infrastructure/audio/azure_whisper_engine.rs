use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AudioUpload, Transcript};

use super::http_response::{audio_part, rejection, transport_error};

pub const AZURE_DEFAULT_API_VERSION: &str = "2024-02-01";

pub struct AzureWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AzureWhisperEngine {
    pub fn new(base_url: &str, deployment: &str, api_key: &str, api_version: &str) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            base_url,
            deployment,
            api_key,
            api_version,
        )
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        deployment: &str,
        api_key: &str,
        api_version: &str,
    ) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            base_url.trim_end_matches('/'),
            deployment,
            api_version,
        );
        Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct AzureTranscriptionResponse {
    text: String,
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    async fn transcribe(&self, audio: &AudioUpload) -> Result<Transcript, TranscriptionError> {
        let form = multipart::Form::new().part("file", audio_part(audio)?);

        tracing::debug!(endpoint = %self.endpoint, "Sending audio to Azure OpenAI Whisper");

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error("request", e))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error("body", e))?;

        let result: AzureTranscriptionResponse = serde_json::from_slice(&body)
            .map_err(|e| TranscriptionError::MalformedResponse(format!("parse: {}", e)))?;
        let transcript = Transcript::new(result.text);

        tracing::info!(
            chars = transcript.char_count(),
            "Azure OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }

    fn name(&self) -> &'static str {
        "azure"
    }
}
