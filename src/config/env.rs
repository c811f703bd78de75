use std::env;
use std::str::FromStr;

use crate::core::bridge::OverflowPolicy;

use super::ServerConfig;

/// Read a variable, treating empty values as unset.
pub(super) fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable, returning `None` when unset.
pub(super) fn env_parse<T>(name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {name} '{raw}': {e}")),
        None => Ok(None),
    }
}

/// Build a configuration from defaults overlaid with environment variables.
pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = ServerConfig::default();

    if let Some(host) = env_string("HOST") {
        config.host = host;
    }
    if let Some(port) = env_parse::<u16>("PORT")? {
        config.port = port;
    }
    if let Some(max_calls) = env_parse::<usize>("MAX_CONCURRENT_CALLS")? {
        config.max_concurrent_calls = Some(max_calls);
    }

    config.openai_api_key = env_string("OPENAI_API_KEY");
    if let Some(model) = env_string("OPENAI_REALTIME_MODEL") {
        config.realtime_model = model;
    }
    if let Some(url) = env_string("OPENAI_REALTIME_URL") {
        config.realtime_url = url;
    }
    config.realtime_voice = env_string("OPENAI_REALTIME_VOICE");

    if let Some(instructions) = env_string("BRIDGE_INSTRUCTIONS") {
        config.instructions = instructions;
    }
    if let Some(cadence) = env_parse::<u32>("BRIDGE_TURN_CADENCE")? {
        config.turn_cadence = cadence;
    }
    if let Some(secs) = env_parse::<u64>("BRIDGE_CONNECT_TIMEOUT_SECS")? {
        config.connect_timeout_secs = secs;
    }
    if let Some(secs) = env_parse::<u64>("BRIDGE_START_TIMEOUT_SECS")? {
        config.start_timeout_secs = secs;
    }
    if let Some(frames) = env_parse::<usize>("BRIDGE_MAX_PENDING_FRAMES")? {
        config.max_pending_frames = frames;
    }
    if let Some(policy) = env_parse::<OverflowPolicy>("BRIDGE_OVERFLOW_POLICY")? {
        config.overflow_policy = policy;
    }

    Ok(config)
}
