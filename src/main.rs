use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use scribe_gateway::application::services::{RetryExecutor, TranscriptionService};
use scribe_gateway::infrastructure::audio::TranscriptionEngineFactory;
use scribe_gateway::infrastructure::observability::{TracingConfig, init_tracing};
use scribe_gateway::infrastructure::time::TokioSleeper;
use scribe_gateway::presentation::shutdown::shutdown_signal;
use scribe_gateway::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    let tracing_config = TracingConfig {
        environment: environment.to_string(),
        json_format: settings.logging.enable_json || TracingConfig::default().json_format,
        default_filter: format!(
            "{},scribe_gateway=debug,tower_http=debug",
            settings.logging.level
        ),
    };
    init_tracing(tracing_config, settings.server.port);

    let engine = TranscriptionEngineFactory::create(
        settings.transcription.provider,
        settings.transcription.engine_options(),
    )?;
    let policy = settings.retry.to_policy()?;

    tracing::info!(
        engine = engine.name(),
        max_attempts = policy.max_attempts(),
        initial_delay_ms = policy.initial_delay().as_millis() as u64,
        backoff_multiplier = policy.backoff_multiplier(),
        "Transcription engine configured"
    );

    let transcription_service = Arc::new(TranscriptionService::new(
        engine,
        RetryExecutor::new(Arc::new(TokioSleeper)),
        policy,
    ));

    let state = AppState::new(transcription_service, settings.clone());
    let shutdown = state.shutdown.clone();
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
