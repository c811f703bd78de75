use super::ServerConfig;
use super::env::load_from_env;
use super::yaml::YamlConfig;

/// Load the environment configuration and apply YAML overrides on top.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
        if let Some(max_calls) = server.max_concurrent_calls {
            config.max_concurrent_calls = Some(max_calls);
        }
    }

    if let Some(openai) = yaml.openai {
        if let Some(api_key) = openai.api_key {
            config.openai_api_key = Some(api_key);
        }
        if let Some(model) = openai.model {
            config.realtime_model = model;
        }
        if let Some(url) = openai.url {
            config.realtime_url = url;
        }
        if let Some(voice) = openai.voice {
            config.realtime_voice = Some(voice);
        }
    }

    if let Some(bridge) = yaml.bridge {
        if let Some(instructions) = bridge.instructions {
            config.instructions = instructions;
        }
        if let Some(cadence) = bridge.turn_cadence {
            config.turn_cadence = cadence;
        }
        if let Some(secs) = bridge.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }
        if let Some(secs) = bridge.start_timeout_secs {
            config.start_timeout_secs = secs;
        }
        if let Some(frames) = bridge.max_pending_frames {
            config.max_pending_frames = frames;
        }
        if let Some(policy) = bridge.overflow_policy {
            config.overflow_policy = policy;
        }
    }

    Ok(config)
}
