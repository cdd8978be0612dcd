//! Tolerant decoding of power level fields.
//!
//! Room state arrives from many servers and room versions. Numeric fields may
//! be string-encoded or plain wrong; none of that is allowed to fail decoding.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::notification::NotificationValue;

/// Integer or string-encoded integer
pub(crate) fn level_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.parse().ok(),
        _ => None,
    }
}

/// A threshold field, or `default` when absent or malformed
pub(crate) fn level_or(field: &str, value: Option<Value>, default: i64) -> i64 {
    let Some(value) = value else {
        return default;
    };

    level_from_value(&value).unwrap_or_else(|| {
        warn!("Ignoring malformed power level field {}: {}, using {}", field, value, default);
        default
    })
}

/// A key to level map; malformed entries are dropped
pub(crate) fn level_map(field: &str, value: Option<Value>) -> HashMap<String, i64> {
    match value {
        None => HashMap::new(),
        Some(Value::Object(entries)) => entries
            .into_iter()
            .filter_map(|(key, value)| match level_from_value(&value) {
                Some(level) => Some((key, level)),
                None => {
                    warn!("Dropping malformed {} entry {}: {}", field, key, value);
                    None
                },
            })
            .collect(),
        Some(other) => {
            warn!("Ignoring non-object power level field {}: {}", field, other);
            HashMap::new()
        },
    }
}

/// The notifications map; anything but an integer is resolved on lookup
pub(crate) fn notification_map(value: Option<Value>) -> HashMap<String, NotificationValue> {
    match value {
        None => HashMap::new(),
        Some(Value::Object(entries)) => entries
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(raw) => Some((key, NotificationValue::LegacyString(raw))),
                other => match other.as_i64() {
                    Some(level) => Some((key, NotificationValue::Int(level))),
                    None => {
                        warn!("Malformed notifications entry {}: {}", key, other);
                        Some((key, NotificationValue::Invalid(other)))
                    },
                },
            })
            .collect(),
        Some(other) => {
            warn!("Ignoring non-object notifications field: {}", other);
            HashMap::new()
        },
    }
}
