use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use scribe_gateway::application::ports::{RemoteRejection, TranscriptionError};
use scribe_gateway::application::services::{RetryError, RetryExecutor, TranscriptionService};
use scribe_gateway::domain::{AttemptPolicy, AudioUpload, Transcript};
use scribe_gateway::infrastructure::audio::MockTranscriptionEngine;
use scribe_gateway::infrastructure::time::RecordingSleeper;

fn wav_upload() -> AudioUpload {
    AudioUpload::new(
        "clip.wav".to_string(),
        "audio/wav".to_string(),
        Bytes::from_static(b"RIFF fake wav"),
        &["audio/wav"],
    )
    .unwrap()
}

fn service_with(
    engine: Arc<MockTranscriptionEngine>,
    sleeper: Arc<RecordingSleeper>,
) -> TranscriptionService {
    TranscriptionService::new(
        engine,
        RetryExecutor::new(sleeper),
        AttemptPolicy::default(),
    )
}

fn transport(detail: &str) -> Result<Transcript, TranscriptionError> {
    Err(TranscriptionError::Transport(detail.to_string()))
}

#[tokio::test]
async fn given_engine_recovers_from_transport_errors_when_transcribing_then_returns_transcript() {
    let engine = Arc::new(MockTranscriptionEngine::scripted(vec![
        transport("connection reset"),
        transport("timed out"),
        Ok(Transcript::new("hello there")),
    ]));
    let sleeper = Arc::new(RecordingSleeper::new());
    let service = service_with(engine.clone(), sleeper.clone());

    let result = service
        .transcribe(&wav_upload(), &CancellationToken::new())
        .await;

    assert_eq!(result.unwrap().as_str(), "hello there");
    assert_eq!(engine.calls(), 3);
    assert_eq!(sleeper.total(), Duration::from_millis(3000));
}

#[tokio::test]
async fn given_engine_keeps_failing_transport_when_transcribing_then_returns_exhausted() {
    let engine = Arc::new(MockTranscriptionEngine::scripted(vec![
        transport("refused"),
        transport("refused"),
        transport("refused"),
        Ok(Transcript::new("never reached")),
    ]));
    let sleeper = Arc::new(RecordingSleeper::new());
    let service = service_with(engine.clone(), sleeper.clone());

    let result = service
        .transcribe(&wav_upload(), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(RetryError::Exhausted {
            attempts: 3,
            last_error: TranscriptionError::Transport(_)
        })
    ));
    assert_eq!(engine.calls(), 3);
}

#[tokio::test]
async fn given_remote_rejection_when_transcribing_then_returns_it_verbatim_after_one_call() {
    let rejection = RemoteRejection {
        status: 429,
        body: r#"{"error":{"message":"Rate limit reached"}}"#.to_string(),
        content_type: Some("application/json".to_string()),
    };
    let engine = Arc::new(MockTranscriptionEngine::scripted(vec![Err(
        TranscriptionError::Rejected(rejection.clone()),
    )]));
    let sleeper = Arc::new(RecordingSleeper::new());
    let service = service_with(engine.clone(), sleeper.clone());

    let result = service
        .transcribe(&wav_upload(), &CancellationToken::new())
        .await;

    match result {
        Err(RetryError::Rejected {
            attempts: 1,
            error: TranscriptionError::Rejected(returned),
        }) => assert_eq!(returned, rejection),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(engine.calls(), 1);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn given_malformed_response_when_transcribing_then_does_not_retry() {
    let engine = Arc::new(MockTranscriptionEngine::scripted(vec![Err(
        TranscriptionError::MalformedResponse("missing text".to_string()),
    )]));
    let service = service_with(engine.clone(), Arc::new(RecordingSleeper::new()));

    let result = service
        .transcribe(&wav_upload(), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(RetryError::Rejected {
            error: TranscriptionError::MalformedResponse(_),
            ..
        })
    ));
    assert_eq!(engine.calls(), 1);
}

#[tokio::test]
async fn given_caller_cancels_during_backoff_when_transcribing_then_returns_cancelled() {
    let cancel = CancellationToken::new();
    let engine = Arc::new(MockTranscriptionEngine::scripted(vec![
        transport("refused"),
        transport("refused"),
    ]));
    let sleeper = Arc::new(RecordingSleeper::cancelling(cancel.clone()));
    let service = service_with(engine.clone(), sleeper);

    let result = service.transcribe(&wav_upload(), &cancel).await;

    assert!(matches!(result, Err(RetryError::Cancelled { attempts: 1 })));
    assert_eq!(engine.calls(), 1);
}
