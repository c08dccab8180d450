use std::env;
use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use anyhow::{Context, anyhow};

use wakegate::{
    ServerConfig,
    core::engine::{HttpSpeakerEncoder, HttpTranscriber, SpeakerEncoder, SpeechTranscriber},
    core::gateway::InferenceGateway,
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration: optional YAML path as the only CLI argument,
    // environment variables otherwise
    let mut args = env::args();
    let _ = args.next();
    let config = match args.next() {
        Some(path) => {
            if let Some(extra) = args.next() {
                anyhow::bail!("Unexpected argument '{extra}' after config path");
            }
            ServerConfig::from_file(Path::new(&path)).map_err(|e| anyhow!(e.to_string()))?
        }
        None => ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?,
    };
    let address = config.address();

    // Construct the inference engines. A missing transcriber is startup-fatal:
    // the service has no value without one. The speaker encoder degrades.
    let transcriber: Box<dyn SpeechTranscriber> =
        Box::new(HttpTranscriber::new(&config.transcriber_url));
    tracing::info!("Transcription engine: {}", config.transcriber_url);

    let encoder: Option<Box<dyn SpeakerEncoder>> = match &config.speaker_encoder_url {
        Some(url) => {
            tracing::info!("Speaker encoder engine: {}", url);
            Some(Box::new(HttpSpeakerEncoder::new(url)))
        }
        None => {
            tracing::warn!("No speaker encoder configured; voice verification unavailable");
            None
        }
    };

    let gateway = InferenceGateway::new(transcriber, encoder, &config.language);

    // Create application state
    let app_state = AppState::new(config, gateway);

    // Combine HTTP API and WebSocket routes; permissive CORS for browser
    // microphone clients
    let app = Router::new()
        .merge(routes::api::create_api_router())
        .merge(routes::ws::create_ws_router())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!("Server listening on {address}");

    axum::serve(listener, app).await?;

    Ok(())
}
