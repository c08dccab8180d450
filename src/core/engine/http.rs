//! HTTP-backed inference engines
//!
//! Engines that delegate to a remote inference service. Audio is shipped as
//! linear16 PCM in the request body; the service replies with a small JSON
//! document. These are the production engine implementations; local
//! in-process engines can be added behind the same traits.

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::audio::encode_pcm16;

use super::{EngineError, SpeakerEncoder, SpeechTranscriber, VoiceEmbedding};

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Speech-to-text engine backed by a remote transcription endpoint.
///
/// Sends `POST {url}?language={lang}` with a linear16 body and expects
/// `{"text": "..."}` back.
pub struct HttpTranscriber {
    client: reqwest::Client,
    url: String,
}

impl HttpTranscriber {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SpeechTranscriber for HttpTranscriber {
    async fn transcribe(&self, samples: &[f32], language: &str) -> Result<String, EngineError> {
        let response = self
            .client
            .post(&self.url)
            .query(&[("language", language)])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(encode_pcm16(samples))
            .send()
            .await?
            .error_for_status()?;

        let body: TranscribeResponse = response
            .json()
            .await
            .map_err(|e| EngineError::MalformedResponse(e.to_string()))?;
        Ok(body.text.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "http-transcriber"
    }
}

/// Speaker-embedding engine backed by a remote encoder endpoint.
///
/// Sends linear16 audio and expects `{"embedding": [f32, ...]}` back.
pub struct HttpSpeakerEncoder {
    client: reqwest::Client,
    url: String,
}

impl HttpSpeakerEncoder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SpeakerEncoder for HttpSpeakerEncoder {
    async fn encode(&self, samples: &[f32]) -> Result<VoiceEmbedding, EngineError> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(encode_pcm16(samples))
            .send()
            .await?
            .error_for_status()?;

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EngineError::MalformedResponse(e.to_string()))?;
        if body.embedding.is_empty() {
            return Err(EngineError::MalformedResponse(
                "embedding is empty".to_string(),
            ));
        }
        Ok(body.embedding)
    }

    fn name(&self) -> &'static str {
        "http-speaker-encoder"
    }
}
