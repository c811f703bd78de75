use url::Url;

use super::ServerConfig;

/// Validate a fully merged configuration.
pub(super) fn validate(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_api_key(&config.openai_api_key)?;
    validate_realtime_url(&config.realtime_url)?;
    validate_turn_cadence(config.turn_cadence)?;
    validate_max_pending_frames(config.max_pending_frames)?;
    validate_max_concurrent_calls(config.max_concurrent_calls)?;
    Ok(())
}

fn validate_api_key(key: &Option<String>) -> Result<(), String> {
    match key {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err("OPENAI_API_KEY is required (or openai.api_key in YAML)".to_string()),
    }
}

fn validate_realtime_url(url: &str) -> Result<(), String> {
    let parsed = Url::parse(url).map_err(|e| format!("Invalid realtime URL '{url}': {e}"))?;
    match parsed.scheme() {
        "ws" | "wss" => Ok(()),
        other => Err(format!(
            "Realtime URL must use ws or wss scheme, got '{other}'"
        )),
    }
}

fn validate_turn_cadence(cadence: u32) -> Result<(), String> {
    if cadence == 0 {
        return Err("Invalid turn cadence: must be at least 1".to_string());
    }
    Ok(())
}

fn validate_max_pending_frames(frames: usize) -> Result<(), String> {
    if frames == 0 {
        return Err("Invalid max pending frames: must be at least 1".to_string());
    }
    Ok(())
}

fn validate_max_concurrent_calls(max_calls: Option<usize>) -> Result<(), String> {
    if max_calls == Some(0) {
        return Err("Invalid max concurrent calls: must be at least 1 when set".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key(&Some("sk-1".to_string())).is_ok());
        assert!(validate_api_key(&Some("  ".to_string())).is_err());
        assert!(validate_api_key(&None).is_err());
    }

    #[test]
    fn test_validate_realtime_url() {
        assert!(validate_realtime_url("wss://api.openai.com/v1/realtime").is_ok());
        assert!(validate_realtime_url("ws://127.0.0.1:9000").is_ok());
        assert!(validate_realtime_url("https://api.openai.com").is_err());
        assert!(validate_realtime_url("::::").is_err());
    }

    #[test]
    fn test_validate_limits() {
        assert!(validate_turn_cadence(1).is_ok());
        assert!(validate_turn_cadence(0).is_err());
        assert!(validate_max_pending_frames(0).is_err());
        assert!(validate_max_concurrent_calls(None).is_ok());
        assert!(validate_max_concurrent_calls(Some(1)).is_ok());
        assert!(validate_max_concurrent_calls(Some(0)).is_err());
    }

    #[test]
    fn test_validate_full_config() {
        let mut config = ServerConfig::default();
        assert!(validate(&config).is_err());

        config.openai_api_key = Some("sk-1".to_string());
        assert!(validate(&config).is_ok());
    }
}
