//! Power level evaluation for Matrix rooms.
//!
//! [`PowerLevels`] is decoded from `m.room.power_levels` content and answers
//! permission queries: a user's level, the level needed to send an event, and
//! notification thresholds. [`RoomPowerLevels`] publishes snapshots of it for
//! sharing across tasks.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod event_type;
pub mod notification;
pub mod power_levels;
pub mod room_levels;

mod lenient;

pub use config::EvaluatorConfig;
pub use error::{ConfigError, Error, PowerLevelsError, Result};
pub use notification::{NotificationFallback, NotificationValue, DEFAULT_NOTIFICATION_LEVEL};
pub use power_levels::{PowerLevelAction, PowerLevels, CREATOR_POWER_LEVEL};
pub use room_levels::RoomPowerLevels;
