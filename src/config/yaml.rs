use serde::Deserialize;
use std::path::PathBuf;

use crate::core::bridge::OverflowPolicy;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// override the environment.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///   max_concurrent_calls: 50
///
/// openai:
///   api_key: "sk-..."
///   model: "gpt-4o-realtime-preview"
///   url: "wss://api.openai.com/v1/realtime"
///   voice: "alloy"
///
/// bridge:
///   instructions: "You are a brief transit assistant."
///   turn_cadence: 15
///   connect_timeout_secs: 10
///   start_timeout_secs: 30
///   max_pending_frames: 500
///   overflow_policy: drop_oldest
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub openai: Option<OpenAIYaml>,
    pub bridge: Option<BridgeYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_concurrent_calls: Option<usize>,
}

/// Realtime model connection from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OpenAIYaml {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub url: Option<String>,
    pub voice: Option<String>,
}

/// Per-call bridge behaviour from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BridgeYaml {
    pub instructions: Option<String>,
    pub turn_cadence: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub start_timeout_secs: Option<u64>,
    pub max_pending_frames: Option<usize>,
    pub overflow_policy: Option<OverflowPolicy>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid YAML.
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
