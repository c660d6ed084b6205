//! Process configuration, loaded from environment variables with defaults.
//! Grounded on the donor's `DATABASE_URL`/`DISABLE_UI`/`ASSETS_DIR`
//! environment-driven pattern in `database/connection.rs` and `main.rs`; no
//! config-file parser is introduced since the surface here is small.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub default_ensemble_size: u32,
    pub default_playback_speed: u32,
    pub event_buffer_cap: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            default_ensemble_size: parse_env_or("DEFAULT_ENSEMBLE_SIZE", crate::predictor::DEFAULT_ENSEMBLE_SIZE),
            default_playback_speed: parse_env_or("DEFAULT_PLAYBACK_SPEED", 1),
            event_buffer_cap: parse_env_or("EVENT_BUFFER_CAP", 32usize),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0:8080".to_string(),
            default_ensemble_size: crate::predictor::DEFAULT_ENSEMBLE_SIZE,
            default_playback_speed: 1,
            event_buffer_cap: 32,
        }
    }
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
