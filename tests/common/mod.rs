//! Shared test fixtures: scripted inference engines and a server harness.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use wakegate::{
    ServerConfig,
    core::engine::{EngineError, SpeakerEncoder, SpeechTranscriber, VoiceEmbedding},
    core::gateway::InferenceGateway,
    routes,
    state::AppState,
};

/// Transcriber scripted off the first decoded sample: a loud leading sample
/// yields the wake phrase, anything else a harmless utterance.
pub struct ScriptedTranscriber;

#[async_trait]
impl SpeechTranscriber for ScriptedTranscriber {
    async fn transcribe(&self, samples: &[f32], _language: &str) -> Result<String, EngineError> {
        let first = samples.first().copied().unwrap_or(0.0);
        if first > 0.5 {
            Ok("你好星年，开灯".to_string())
        } else {
            Ok("现在几点了".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "scripted-transcriber"
    }
}

/// Encoder that reads the speaker identity out of samples 1..3, so tests can
/// shape matching and non-matching voiceprints independently of the wake
/// trigger in sample 0.
pub struct ScriptedEncoder;

#[async_trait]
impl SpeakerEncoder for ScriptedEncoder {
    async fn encode(&self, samples: &[f32]) -> Result<VoiceEmbedding, EngineError> {
        if samples.len() < 3 {
            return Err(EngineError::Other("audio too short".to_string()));
        }
        Ok(vec![samples[1], samples[2]])
    }

    fn name(&self) -> &'static str {
        "scripted-encoder"
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        transcriber_url: "http://unused.invalid/transcribe".to_string(),
        speaker_encoder_url: None,
        language: "zh".to_string(),
        default_wake_word: "你好星年".to_string(),
    }
}

/// Build application state around scripted engines.
pub fn scripted_state(with_encoder: bool) -> Arc<AppState> {
    let encoder: Option<Box<dyn SpeakerEncoder>> = if with_encoder {
        Some(Box::new(ScriptedEncoder))
    } else {
        None
    };
    let gateway = InferenceGateway::new(Box::new(ScriptedTranscriber), encoder, "zh");
    AppState::new(test_config(), gateway)
}

/// Spawn the full router on an ephemeral port and return its address.
pub async fn spawn_server(state: Arc<AppState>) -> SocketAddr {
    let app = Router::new()
        .merge(routes::api::create_api_router())
        .merge(routes::ws::create_ws_router())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Build a PCM16 chunk whose first three samples carry the test script:
/// `trigger` drives the transcriber, `id_a`/`id_b` drive the encoder.
pub fn pcm_chunk(trigger: i16, id_a: i16, id_b: i16) -> Vec<u8> {
    let mut samples = vec![trigger, id_a, id_b];
    samples.resize(160, 0);

    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Chunk that transcribes to the wake phrase. Speaker identity (0.61, 0.0).
pub fn wake_chunk() -> Vec<u8> {
    pcm_chunk(30000, 20000, 0)
}

/// Wake chunk with an orthogonal speaker identity (0.0, 0.61).
pub fn impostor_wake_chunk() -> Vec<u8> {
    pcm_chunk(30000, 0, 20000)
}

/// Chunk that transcribes to a non-wake utterance.
pub fn silence_chunk() -> Vec<u8> {
    pcm_chunk(0, 1000, 1000)
}
