//! Well-known Matrix event types used when checking send permissions.

/// A room message
pub const MESSAGE: &str = "m.room.message";
/// An encrypted room event
pub const ENCRYPTED: &str = "m.room.encrypted";
/// An annotation on another event
pub const REACTION: &str = "m.reaction";

/// Room name state event
pub const STATE_ROOM_NAME: &str = "m.room.name";
/// Room topic state event
pub const STATE_ROOM_TOPIC: &str = "m.room.topic";
/// The power levels event itself
pub const STATE_POWER_LEVELS: &str = "m.room.power_levels";
