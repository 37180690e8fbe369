use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use scribe_gateway::application::ports::{TranscriptionEngine, TranscriptionError};
use scribe_gateway::domain::AudioUpload;
use scribe_gateway::infrastructure::audio::AzureWhisperEngine;

async fn start_mock_azure_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/openai/deployments/my-deployment/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn wav_upload(bytes: &'static [u8]) -> AudioUpload {
    AudioUpload::new(
        "clip.wav".to_string(),
        "audio/wav".to_string(),
        Bytes::from_static(bytes),
        &["audio/wav"],
    )
    .unwrap()
}

#[tokio::test]
async fn given_valid_audio_bytes_when_azure_transcribes_then_returns_display_text() {
    let response_body = r#"{"text": "Hello from Azure Whisper"}"#;
    let (base_url, shutdown_tx) = start_mock_azure_server(200, response_body).await;

    let engine = AzureWhisperEngine::new(&base_url, "my-deployment", "test-key", "2024-02-01");

    let result = engine.transcribe(&wav_upload(b"fake audio bytes")).await;

    assert_eq!(result.unwrap().as_str(), "Hello from Azure Whisper");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_azure_api_returns_error_status_when_transcribing_then_returns_rejection() {
    let response_body = r#"{"error": {"code": "InvalidRequest", "message": "bad audio"}}"#;
    let (base_url, shutdown_tx) = start_mock_azure_server(400, response_body).await;

    let engine = AzureWhisperEngine::new(&base_url, "my-deployment", "test-key", "2024-02-01");

    let result = engine.transcribe(&wav_upload(b"bad audio")).await;

    match result {
        Err(TranscriptionError::Rejected(rejection)) => {
            assert_eq!(rejection.status, 400);
            assert_eq!(rejection.body, response_body);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_azure_api_returns_unparseable_body_when_transcribing_then_returns_malformed_response()
{
    let (base_url, shutdown_tx) = start_mock_azure_server(200, "not json").await;

    let engine = AzureWhisperEngine::new(&base_url, "my-deployment", "test-key", "2024-02-01");

    let result = engine.transcribe(&wav_upload(b"audio")).await;

    assert!(matches!(result, Err(TranscriptionError::MalformedResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_azure_api_returns_empty_text_when_transcribing_then_returns_empty_transcript() {
    let response_body = r#"{"text": ""}"#;
    let (base_url, shutdown_tx) = start_mock_azure_server(200, response_body).await;

    let engine = AzureWhisperEngine::new(&base_url, "my-deployment", "test-key", "2024-02-01");

    let result = engine.transcribe(&wav_upload(b"silent audio")).await;

    assert_eq!(result.unwrap().as_str(), "");
    shutdown_tx.send(()).ok();
}
