use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{AudioUpload, Transcript};

use super::http_response::{audio_part, rejection, transport_error};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "whisper-1";

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, base_url, model)
    }

    pub fn with_client(
        client: reqwest::Client,
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| OPENAI_DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, audio: &AudioUpload) -> Result<Transcript, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", audio_part(audio)?);

        tracing::debug!(model = %self.model, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error("request", e))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error("body", e))?;
        let transcript = Transcript::new(text);

        tracing::info!(
            chars = transcript.char_count(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
