use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when working with power levels
#[derive(Error, Debug)]
pub enum Error {
    /// An error from the power levels module
    #[error("Power levels error: {0}")]
    PowerLevels(#[from] PowerLevelsError),

    /// An error from the config module
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for power level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when evaluating a power levels snapshot
#[derive(Error, Debug)]
pub enum PowerLevelsError {
    /// A notification level that is neither an integer nor a base-10 string
    #[error("Invalid notification level for {key:?}: {value:?}")]
    InvalidNotificationLevel {
        key: String,
        value: String,
        #[source]
        source: Option<ParseIntError>,
    },

    /// The power levels content is not a JSON object
    #[error("Invalid power levels payload: {0}")]
    InvalidPayload(String),

    /// An action name that does not map to a power level threshold
    #[error("Unknown power level action: {0}")]
    UnknownAction(String),
}

/// Errors that can occur when loading the evaluator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
