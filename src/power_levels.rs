use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{PowerLevelsError, Result};
use crate::event_type;
use crate::lenient::{level_map, level_or, notification_map};
use crate::notification::{NotificationFallback, NotificationValue, DEFAULT_NOTIFICATION_LEVEL};

const DEFAULT_BAN: i64 = 50;
const DEFAULT_KICK: i64 = 50;
const DEFAULT_INVITE: i64 = 50;
const DEFAULT_REDACT: i64 = 50;
const DEFAULT_EVENTS_DEFAULT: i64 = 0;
const DEFAULT_USERS_DEFAULT: i64 = 0;
const DEFAULT_STATE_DEFAULT: i64 = 50;

/// Power level given to the creator of a new room
pub const CREATOR_POWER_LEVEL: i64 = 100;

/// Power levels for a Matrix room
///
/// Decoding never fails on malformed numeric fields: each one falls back to
/// its protocol default. The `users` map is the only part callers are expected
/// to change after construction, through [`PowerLevels::set_user_power_level`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPowerLevels")]
pub struct PowerLevels {
    /// Power level required to ban users
    pub ban: i64,

    /// Power level required to kick users
    pub kick: i64,

    /// Power level required to invite users
    pub invite: i64,

    /// Power level required to redact events
    pub redact: i64,

    /// Default power level for sending message events
    pub events_default: i64,

    /// Power levels for specific event types
    pub events: HashMap<String, i64>,

    /// Default power level for users
    pub users_default: i64,

    /// Power levels for specific users
    pub users: HashMap<String, i64>,

    /// Default power level for sending state events
    pub state_default: i64,

    /// Notification power levels
    pub notifications: HashMap<String, NotificationValue>,
}

/// Wire shape of `m.room.power_levels` content before validation
#[derive(Deserialize)]
struct RawPowerLevels {
    #[serde(default)]
    ban: Option<Value>,
    #[serde(default)]
    kick: Option<Value>,
    #[serde(default)]
    invite: Option<Value>,
    #[serde(default)]
    redact: Option<Value>,
    #[serde(default)]
    events_default: Option<Value>,
    #[serde(default)]
    events: Option<Value>,
    #[serde(default)]
    users_default: Option<Value>,
    #[serde(default)]
    users: Option<Value>,
    #[serde(default)]
    state_default: Option<Value>,
    #[serde(default)]
    notifications: Option<Value>,
}

impl From<RawPowerLevels> for PowerLevels {
    fn from(raw: RawPowerLevels) -> Self {
        Self {
            ban: level_or("ban", raw.ban, DEFAULT_BAN),
            kick: level_or("kick", raw.kick, DEFAULT_KICK),
            invite: level_or("invite", raw.invite, DEFAULT_INVITE),
            redact: level_or("redact", raw.redact, DEFAULT_REDACT),
            events_default: level_or("events_default", raw.events_default, DEFAULT_EVENTS_DEFAULT),
            events: level_map("events", raw.events),
            users_default: level_or("users_default", raw.users_default, DEFAULT_USERS_DEFAULT),
            users: level_map("users", raw.users),
            state_default: level_or("state_default", raw.state_default, DEFAULT_STATE_DEFAULT),
            notifications: notification_map(raw.notifications),
        }
    }
}

impl Default for PowerLevels {
    fn default() -> Self {
        Self {
            ban: DEFAULT_BAN,
            kick: DEFAULT_KICK,
            invite: DEFAULT_INVITE,
            redact: DEFAULT_REDACT,
            events_default: DEFAULT_EVENTS_DEFAULT,
            events: HashMap::new(),
            users_default: DEFAULT_USERS_DEFAULT,
            users: HashMap::new(),
            state_default: DEFAULT_STATE_DEFAULT,
            notifications: HashMap::new(),
        }
    }
}

/// Room actions gated by a dedicated power level threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerLevelAction {
    Ban,
    Kick,
    Invite,
    Redact,
}

impl PowerLevelAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Kick => "kick",
            Self::Invite => "invite",
            Self::Redact => "redact",
        }
    }
}

impl fmt::Display for PowerLevelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerLevelAction {
    type Err = PowerLevelsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ban" => Ok(Self::Ban),
            "kick" => Ok(Self::Kick),
            "invite" => Ok(Self::Invite),
            "redact" => Ok(Self::Redact),
            other => Err(PowerLevelsError::UnknownAction(other.to_string())),
        }
    }
}

impl PowerLevels {
    /// Default power levels with the room creator promoted to admin
    pub fn new_with_creator(creator_user_id: &str) -> Self {
        let mut power_levels = Self::default();
        power_levels.set_user_power_level(Some(creator_user_id), CREATOR_POWER_LEVEL);
        power_levels
    }

    /// Decode `m.room.power_levels` content
    ///
    /// # Errors
    /// * `PowerLevelsError::InvalidPayload` - the content is not a JSON object
    pub fn from_json_value(content: Value) -> Result<Self> {
        if !content.is_object() {
            return Err(PowerLevelsError::InvalidPayload(format!(
                "expected an object, got {content}"
            ))
            .into());
        }

        serde_json::from_value(content)
            .map_err(|e| PowerLevelsError::InvalidPayload(e.to_string()).into())
    }

    /// Decode `m.room.power_levels` content from a JSON string
    ///
    /// # Errors
    /// * `PowerLevelsError::InvalidPayload` - not JSON, or not a JSON object
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| PowerLevelsError::InvalidPayload(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Returns the power level of a user
    ///
    /// Unlisted users and an empty user id get `users_default`.
    pub fn user_power_level(&self, user_id: &str) -> i64 {
        if user_id.is_empty() {
            return self.users_default;
        }

        match self.users.get(user_id) {
            Some(level) => *level,
            None => {
                debug!("User {} not listed, using users_default {}", user_id, self.users_default);
                self.users_default
            },
        }
    }

    /// Updates the power level of a user
    ///
    /// A missing user id is ignored. The level is not range checked. An empty
    /// user id is stored but never read back, since `user_power_level("")`
    /// always returns `users_default`.
    pub fn set_user_power_level(&mut self, user_id: Option<&str>, power_level: i64) {
        if let Some(user_id) = user_id {
            self.users.insert(user_id.to_string(), power_level);
        }
    }

    /// Tell if a user can send an event of the given type as a message
    pub fn may_send_event_of_type(&self, event_type: &str, user_id: &str) -> bool {
        if event_type.is_empty() || user_id.is_empty() {
            return false;
        }

        self.user_power_level(user_id)
            >= self.minimum_power_level_for_sending_event_as_message(Some(event_type))
    }

    /// Tell if a user can send an event of the given type as a state event
    pub fn may_send_state_event(&self, event_type: &str, user_id: &str) -> bool {
        if event_type.is_empty() || user_id.is_empty() {
            return false;
        }

        self.user_power_level(user_id)
            >= self.minimum_power_level_for_sending_event_as_state_event(Some(event_type))
    }

    /// Tell if a user can send a room message
    pub fn may_send_message(&self, user_id: &str) -> bool {
        self.may_send_event_of_type(event_type::MESSAGE, user_id)
    }

    /// Minimum power level to send an event of the given type as a message
    pub fn minimum_power_level_for_sending_event_as_message(
        &self,
        event_type: Option<&str>,
    ) -> i64 {
        event_type
            .and_then(|event_type| self.events.get(event_type))
            .copied()
            .unwrap_or(self.events_default)
    }

    /// Minimum power level to send an event of the given type as a state event
    pub fn minimum_power_level_for_sending_event_as_state_event(
        &self,
        event_type: Option<&str>,
    ) -> i64 {
        event_type
            .and_then(|event_type| self.events.get(event_type))
            .copied()
            .unwrap_or(self.state_default)
    }

    /// Power level threshold for a moderation action
    pub fn required_level(&self, action: PowerLevelAction) -> i64 {
        match action {
            PowerLevelAction::Ban => self.ban,
            PowerLevelAction::Kick => self.kick,
            PowerLevelAction::Invite => self.invite,
            PowerLevelAction::Redact => self.redact,
        }
    }

    /// Tell if a user meets the threshold for a moderation action
    pub fn user_may(&self, action: PowerLevelAction, user_id: &str) -> bool {
        if user_id.is_empty() {
            return false;
        }

        self.user_power_level(user_id) >= self.required_level(action)
    }

    /// Get the notification level for a key
    ///
    /// Missing keys get `DEFAULT_NOTIFICATION_LEVEL`.
    ///
    /// # Errors
    /// * `PowerLevelsError::InvalidNotificationLevel` - the key holds a legacy
    ///   string that is not a base-10 integer
    pub fn notification_level(&self, key: Option<&str>) -> Result<i64> {
        match key.and_then(|key| self.notifications.get(key).map(|value| (key, value))) {
            Some((key, value)) => value.resolve(key),
            None => Ok(DEFAULT_NOTIFICATION_LEVEL),
        }
    }

    /// Get the notification level for a key, resolving failures per `fallback`
    pub fn notification_level_with_policy(
        &self,
        key: Option<&str>,
        fallback: NotificationFallback,
    ) -> Result<i64> {
        fallback.apply(self.notification_level(key))
    }
}
