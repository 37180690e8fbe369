use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Extension, Multipart, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::Instrument;

use crate::application::ports::TranscriptionError;
use crate::application::services::{RetryError, TranscriptionResult};
use crate::domain::{AudioUpload, UploadError};
use crate::infrastructure::observability::{RequestId, sanitize_for_log};
use crate::presentation::state::AppState;

pub const INVALID_FORM_MESSAGE: &str = "Invalid Content-Type. Expected 'multipart/form-data'.";
pub const MISSING_FILE_MESSAGE: &str = "No audio file provided.";
pub const EMPTY_FILE_MESSAGE: &str = "Audio file is empty.";
pub const RETRIES_EXHAUSTED_MESSAGE: &str = "Service Unavailable: Max retries reached.";
pub const CANCELLED_MESSAGE: &str = "Transcription cancelled.";

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub request_id: String,
}

fn error_response(request_id: &str, status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            request_id: request_id.to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, request_id, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Transcription request is not multipart");
            return error_response(&request_id, StatusCode::BAD_REQUEST, INVALID_FORM_MESSAGE);
        }
    };

    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) if f.file_name().is_some() => break f,
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Transcription request with no file");
                return error_response(&request_id, StatusCode::BAD_REQUEST, MISSING_FILE_MESSAGE);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    &request_id,
                    e.status(),
                    format!("Failed to read multipart: {}", e),
                );
            }
        }
    };

    let filename = field.file_name().unwrap_or("audio.wav").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read audio bytes");
            return error_response(
                &request_id,
                e.status(),
                format!("Failed to read file: {}", e),
            );
        }
    };

    let accepted = &state.settings.upload.accepted_content_types;
    let upload = match AudioUpload::new(filename, content_type, data, accepted.as_slice()) {
        Ok(upload) => upload,
        Err(UploadError::UnsupportedContentType(content_type)) => {
            tracing::warn!(content_type = %content_type, "Unsupported audio content type");
            return error_response(
                &request_id,
                StatusCode::BAD_REQUEST,
                format!(
                    "Invalid Content-Type for audio. Expected '{}'.",
                    accepted.join("', '")
                ),
            );
        }
        Err(UploadError::EmptyFile) => {
            tracing::warn!("Empty audio file uploaded");
            return error_response(&request_id, StatusCode::BAD_REQUEST, EMPTY_FILE_MESSAGE);
        }
    };

    tracing::debug!(bytes = upload.size_bytes(), "Audio upload received");

    // Dropping the handler (client gone) drops the guard and cancels the task's wait.
    let cancel = state.shutdown.child_token();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let service = Arc::clone(&state.transcription_service);
    let task = tokio::spawn(
        async move { service.transcribe(&upload, &cancel).await }.in_current_span(),
    );

    match task.await {
        Ok(result) => transcription_response(result, &request_id),
        Err(e) => {
            tracing::error!(error = %e, "Transcription task failed");
            error_response(
                &request_id,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Transcription task failed",
            )
        }
    }
}

/// Maps the outcome of a transcription to the HTTP response seen by the caller.
pub fn transcription_response(result: TranscriptionResult, request_id: &str) -> Response {
    match result {
        Ok(transcript) => (
            StatusCode::OK,
            Json(TranscriptionResponse {
                text: transcript.into_string(),
            }),
        )
            .into_response(),
        Err(RetryError::Rejected { error, .. }) => rejected_response(error, request_id),
        Err(RetryError::Exhausted { .. }) => {
            error_response(
                request_id,
                StatusCode::SERVICE_UNAVAILABLE,
                RETRIES_EXHAUSTED_MESSAGE,
            )
        }
        Err(RetryError::Cancelled { .. }) => {
            error_response(request_id, StatusCode::SERVICE_UNAVAILABLE, CANCELLED_MESSAGE)
        }
    }
}

fn rejected_response(error: TranscriptionError, request_id: &str) -> Response {
    match error {
        TranscriptionError::Rejected(rejection) => {
            tracing::warn!(
                status = rejection.status,
                body = %sanitize_for_log(&rejection.body),
                "Transcription service rejected request"
            );

            let status = StatusCode::from_u16(rejection.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut response = (status, rejection.body).into_response();
            if let Some(value) = rejection
                .content_type
                .as_deref()
                .and_then(|ct| HeaderValue::from_str(ct).ok())
            {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            response
        }
        TranscriptionError::MalformedResponse(detail) => {
            tracing::error!(detail = %detail, "Malformed response from transcription service");
            error_response(
                request_id,
                StatusCode::BAD_GATEWAY,
                "Malformed response from transcription service",
            )
        }
        other => {
            tracing::error!(error = %other, "Transcription request could not be sent");
            error_response(request_id, StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
