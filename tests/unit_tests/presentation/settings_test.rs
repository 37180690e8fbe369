use std::time::Duration;

use scribe_gateway::application::ports::TranscriptionError;
use scribe_gateway::domain::AttemptPolicyError;
use scribe_gateway::infrastructure::audio::{TranscriptionEngineFactory, TranscriptionProvider};
use scribe_gateway::presentation::Environment;
use scribe_gateway::presentation::config::{RetrySettings, TranscriptionSettings};

fn azure_settings(azure_endpoint: Option<&str>) -> TranscriptionSettings {
    TranscriptionSettings {
        provider: TranscriptionProvider::Azure,
        api_key: Some("azure-key".to_string()),
        base_url: None,
        model: "whisper-1".to_string(),
        azure_endpoint: azure_endpoint.map(String::from),
        azure_deployment: Some("whisper".to_string()),
        azure_api_version: None,
        connect_timeout_secs: 10,
        request_timeout_secs: 120,
    }
}

#[test]
fn given_retry_settings_when_converting_then_builds_matching_policy() {
    let settings = RetrySettings {
        max_attempts: 4,
        initial_delay_ms: 500,
        backoff_multiplier: 2.0,
        max_delay_ms: Some(1500),
    };

    let policy = settings.to_policy().unwrap();

    assert_eq!(policy.max_attempts(), 4);
    assert_eq!(policy.initial_delay(), Duration::from_millis(500));
    assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
    assert_eq!(policy.delay_after(2), Duration::from_millis(1500));
}

#[test]
fn given_zero_attempts_in_settings_when_converting_then_returns_error() {
    let settings = RetrySettings {
        max_attempts: 0,
        initial_delay_ms: 1000,
        backoff_multiplier: 2.0,
        max_delay_ms: None,
    };

    assert_eq!(
        settings.to_policy().unwrap_err(),
        AttemptPolicyError::ZeroAttempts(0)
    );
}

#[test]
fn given_environment_names_when_parsing_then_maps_aliases() {
    assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
    assert_eq!("Development".parse::<Environment>().unwrap(), Environment::Local);
    assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
    assert_eq!("production".parse::<Environment>().unwrap(), Environment::Prod);
    assert!("staging".parse::<Environment>().is_err());
}

#[test]
fn given_no_config_file_when_loading_settings_then_uses_built_in_defaults() {
    let settings = scribe_gateway::presentation::Settings::load(Environment::Test).unwrap();

    let policy = settings.retry.to_policy().unwrap();
    assert_eq!(policy.max_attempts(), 3);
    assert_eq!(policy.delay_after(0), Duration::from_millis(1000));
    assert_eq!(policy.backoff_multiplier(), 2.0);
    assert_eq!(settings.upload.accepted_content_types, vec!["audio/wav"]);
    assert_eq!(settings.transcription.model, "whisper-1");
    assert_eq!(settings.upload.max_body_bytes(), 25 * 1024 * 1024);
}

#[test]
fn given_azure_settings_without_endpoint_when_creating_engine_then_returns_configuration_error() {
    let settings = azure_settings(None);

    let result = TranscriptionEngineFactory::create(settings.provider, settings.engine_options());

    assert!(matches!(result, Err(TranscriptionError::Configuration(_))));
}

#[test]
fn given_azure_settings_with_endpoint_when_creating_engine_then_returns_azure_engine() {
    let settings = azure_settings(Some("https://example.openai.azure.com"));

    let engine =
        TranscriptionEngineFactory::create(settings.provider, settings.engine_options()).unwrap();

    assert_eq!(engine.name(), "azure");
}

#[test]
fn given_no_config_file_when_loading_settings_then_azure_endpoint_is_not_defaulted() {
    let settings = scribe_gateway::presentation::Settings::load(Environment::Test).unwrap();

    assert!(settings.transcription.azure_endpoint.is_none());
    assert!(settings.transcription.base_url.is_none());
}
