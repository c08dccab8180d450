use std::env;

use super::yaml::YamlConfig;
use super::{DEFAULT_LANGUAGE, DEFAULT_WAKE_WORD, ServerConfig};

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads configuration from environment variables with sensible defaults.
    /// Also loads from a .env file if present using dotenvy.
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        merge_config(None)
    }
}

/// Merge YAML configuration (if any) with environment variables.
///
/// Environment variables take priority over YAML values, which take priority
/// over defaults. The merged configuration is validated before being returned.
pub fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let yaml = yaml.unwrap_or_default();

    let host = env::var("HOST")
        .ok()
        .or(yaml.server.host)
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let port = match env::var("PORT") {
        Ok(raw) => raw
            .parse::<u16>()
            .map_err(|e| format!("Invalid port number: {e}"))?,
        Err(_) => yaml.server.port.unwrap_or(8000),
    };

    let transcriber_url = env::var("TRANSCRIBER_URL")
        .ok()
        .or(yaml.engines.transcriber_url)
        .ok_or("TRANSCRIBER_URL is required (no transcription engine endpoint configured)")?;
    let speaker_encoder_url = env::var("SPEAKER_ENCODER_URL")
        .ok()
        .or(yaml.engines.speaker_encoder_url);

    let language = env::var("LANGUAGE")
        .ok()
        .or(yaml.recognition.language)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let default_wake_word = env::var("DEFAULT_WAKE_WORD")
        .ok()
        .or(yaml.recognition.default_wake_word)
        .unwrap_or_else(|| DEFAULT_WAKE_WORD.to_string());

    if default_wake_word.trim().is_empty() {
        return Err("DEFAULT_WAKE_WORD must not be empty".into());
    }

    Ok(ServerConfig {
        host,
        port,
        transcriber_url,
        speaker_encoder_url,
        language,
        default_wake_word,
    })
}
