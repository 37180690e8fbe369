use reqwest::multipart;

use crate::application::ports::{RemoteRejection, TranscriptionError};
use crate::domain::AudioUpload;

pub(super) fn audio_part(audio: &AudioUpload) -> Result<multipart::Part, TranscriptionError> {
    let file_name = if audio.filename.is_empty() {
        "audio.wav".to_string()
    } else {
        audio.filename.clone()
    };

    multipart::Part::bytes(audio.data.to_vec())
        .file_name(file_name)
        .mime_str(&audio.content_type)
        .map_err(|e| TranscriptionError::InvalidRequest(format!("mime: {}", e)))
}

pub(super) fn transport_error(stage: &str, error: reqwest::Error) -> TranscriptionError {
    TranscriptionError::Transport(format!("{}: {}", stage, error))
}

/// Turns a non-2xx response into a rejection carrying status and body verbatim.
pub(super) async fn rejection(response: reqwest::Response) -> TranscriptionError {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    match response.text().await {
        Ok(body) => TranscriptionError::Rejected(RemoteRejection {
            status,
            body,
            content_type,
        }),
        Err(e) => transport_error("error body", e),
    }
}
