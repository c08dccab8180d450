//! Configuration module for the wakegate server
//!
//! Handles server configuration from YAML files and environment variables.
//! Environment variables always override YAML values.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading and merging

use std::path::Path;

mod env;
mod yaml;

/// Server configuration
///
/// Contains all configuration needed to run the wakegate server:
/// - Server settings (host, port)
/// - Inference engine endpoints (transcriber required, speaker encoder optional)
/// - Recognition settings (language, default wake word)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Inference engine endpoints
    pub transcriber_url: String,
    pub speaker_encoder_url: Option<String>,

    // Recognition settings
    pub language: String,
    pub default_wake_word: String,
}

/// Default wake word used for sessions that never configured one.
pub const DEFAULT_WAKE_WORD: &str = "你好星年";

/// Language the transcription engine is pinned to when none is configured.
pub const DEFAULT_LANGUAGE: &str = "zh";

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable overrides
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables
    /// 2. YAML file values
    /// 3. Default values
    ///
    /// # Errors
    /// Returns an error if the YAML file cannot be read or is malformed,
    /// if environment variables have invalid formats, or if no transcriber
    /// endpoint ends up configured.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        env::merge_config(Some(yaml_config))
    }

    /// Get the server address as a string in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if a speaker encoder endpoint is configured
    ///
    /// Speaker verification degrades to "unavailable" when this is false;
    /// it is never a startup failure.
    pub fn has_speaker_encoder(&self) -> bool {
        self.speaker_encoder_url.is_some()
    }
}
