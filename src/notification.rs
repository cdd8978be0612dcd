use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{PowerLevelsError, Result};

/// Level returned for notification keys that are not configured
pub const DEFAULT_NOTIFICATION_LEVEL: i64 = 50;

/// Notification power level value
///
/// Early rooms stored these levels as strings, so both encodings are accepted
/// on the wire and resolved on lookup. Any other JSON value is kept as
/// `Invalid` and fails on lookup like an unparseable string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationValue {
    Int(i64),
    LegacyString(String),
    Invalid(Value),
}

impl NotificationValue {
    /// Resolve the stored value to a power level
    ///
    /// # Errors
    /// * `PowerLevelsError::InvalidNotificationLevel` - a legacy string that is
    ///   not a base-10 integer, or a value of any other JSON type
    pub fn resolve(&self, key: &str) -> Result<i64> {
        match self {
            Self::Int(level) => Ok(*level),
            Self::LegacyString(raw) => raw.parse::<i64>().map_err(|source| {
                PowerLevelsError::InvalidNotificationLevel {
                    key: key.to_string(),
                    value: raw.clone(),
                    source: Some(source),
                }
                .into()
            }),
            Self::Invalid(value) => Err(PowerLevelsError::InvalidNotificationLevel {
                key: key.to_string(),
                value: value.to_string(),
                source: None,
            }
            .into()),
        }
    }
}

impl From<i64> for NotificationValue {
    fn from(level: i64) -> Self {
        Self::Int(level)
    }
}

impl From<&str> for NotificationValue {
    fn from(level: &str) -> Self {
        Self::LegacyString(level.to_string())
    }
}

/// What to do with a notification level that cannot be resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFallback {
    /// Surface the parse failure to the caller
    #[default]
    Strict,
    /// Log the failure and use `DEFAULT_NOTIFICATION_LEVEL`
    Default,
}

impl NotificationFallback {
    pub(crate) fn apply(self, resolved: Result<i64>) -> Result<i64> {
        match (self, resolved) {
            (Self::Default, Err(error)) => {
                warn!("Falling back to default notification level: {}", error);
                Ok(DEFAULT_NOTIFICATION_LEVEL)
            },
            (_, resolved) => resolved,
        }
    }
}
