use serde::Deserialize;
use std::path::Path;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Environment
/// variables can override any values specified here.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///
/// engines:
///   transcriber_url: "http://asr.internal:9000/transcribe"
///   speaker_encoder_url: "http://spk.internal:9001/embed"
///
/// recognition:
///   language: "zh"
///   default_wake_word: "你好星年"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct YamlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub engines: EnginesSection,
    #[serde(default)]
    pub recognition: RecognitionSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnginesSection {
    pub transcriber_url: Option<String>,
    pub speaker_encoder_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognitionSection {
    pub language: Option<String>,
    pub default_wake_word: Option<String>,
}

impl YamlConfig {
    /// Load and parse a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        let config: YamlConfig = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;
        Ok(config)
    }
}
