use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{ConfigError, Result};
use crate::notification::NotificationFallback;

/// Evaluator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Policy for notification levels that cannot be parsed
    #[serde(default)]
    pub notification_fallback: NotificationFallback,

    /// Log level: trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            notification_fallback: NotificationFallback::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EvaluatorConfig {
    /// Load the config from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let config = toml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

        Ok(config)
    }

    /// Log level as a tracing level, `INFO` when unrecognised
    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}
