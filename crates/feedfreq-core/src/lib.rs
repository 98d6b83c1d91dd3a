//! Shared configuration, feed catalogue, and settings persistence for feedfreq.

pub mod app_config;
pub mod config;
pub mod feeds;
pub mod settings;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{clamp_top_n, load_app_config, load_app_config_from_env, MAX_TOP_N, MIN_TOP_N};
pub use feeds::{default_feeds, FeedSource};
pub use settings::{JsonFileSettingsStore, Settings, SettingsStore};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to access settings file {path}: {source}")]
    SettingsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    SettingsParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}
