//! Configuration module for the voice bridge server
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Applying YAML overrides on top of the environment
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use voice_bridge::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod validation;
mod yaml;

use crate::core::bridge::{
    BridgeConfig, DEFAULT_CLOSE_TIMEOUT, DEFAULT_INSTRUCTIONS, DEFAULT_MAX_PENDING_FRAMES, DEFAULT_TURN_CADENCE,
    OverflowPolicy,
};
use crate::core::realtime::RealtimeConfig;
use crate::core::realtime::openai::{DEFAULT_REALTIME_MODEL, OPENAI_REALTIME_URL};

pub use yaml::YamlConfig;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Server configuration
///
/// Contains everything needed to run the bridge:
/// - Listener settings (host, port, call limit)
/// - Realtime model connection (API key, model, endpoint, voice)
/// - Per-call bridge behaviour (instructions, turn cadence, deadlines, pending queue)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,
    /// Maximum simultaneous calls, unlimited when `None`
    pub max_concurrent_calls: Option<usize>,

    // Realtime model settings
    /// OpenAI API key, required to start
    pub openai_api_key: Option<String>,
    pub realtime_model: String,
    pub realtime_url: String,
    /// Output voice, provider default when `None`
    pub realtime_voice: Option<String>,

    // Bridge settings
    pub instructions: String,
    /// Media chunks per committed turn
    pub turn_cadence: u32,
    /// Upstream connect deadline in seconds, 0 disables
    pub connect_timeout_secs: u64,
    /// Deadline for the telephony `start` event in seconds, 0 disables
    pub start_timeout_secs: u64,
    pub max_pending_frames: usize,
    pub overflow_policy: OverflowPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_concurrent_calls: None,
            openai_api_key: None,
            realtime_model: DEFAULT_REALTIME_MODEL.to_string(),
            realtime_url: OPENAI_REALTIME_URL.to_string(),
            realtime_voice: None,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            turn_cadence: DEFAULT_TURN_CADENCE,
            connect_timeout_secs: 10,
            start_timeout_secs: 30,
            max_pending_frames: DEFAULT_MAX_PENDING_FRAMES,
            overflow_policy: OverflowPolicy::DropOldest,
        }
    }
}

/// Implement Drop to zeroize the API key when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.openai_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads the process environment (including values loaded from `.env` in
    /// main.rs), applies defaults for anything unset, and validates the result.
    ///
    /// # Errors
    /// Returns an error if a variable has an invalid format or validation fails,
    /// for example when `OPENAI_API_KEY` is missing.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_secs > 0).then(|| Duration::from_secs(self.connect_timeout_secs))
    }

    pub fn start_timeout(&self) -> Option<Duration> {
        (self.start_timeout_secs > 0).then(|| Duration::from_secs(self.start_timeout_secs))
    }

    /// Per-call parameters handed to each new session.
    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            turn_cadence: self.turn_cadence,
            instructions: self.instructions.clone(),
            voice: self.realtime_voice.clone(),
            max_pending_frames: self.max_pending_frames,
            overflow_policy: self.overflow_policy,
            connect_timeout: self.connect_timeout(),
            start_timeout: self.start_timeout(),
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        }
    }

    /// Connection settings for the realtime model connector.
    pub fn realtime_config(&self) -> RealtimeConfig {
        RealtimeConfig {
            api_key: self.openai_api_key.clone().unwrap_or_default(),
            model: self.realtime_model.clone(),
            url: self.realtime_url.clone(),
        }
    }
}
