use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::power_levels::PowerLevels;

/// Current power levels of one room, shared between readers and the sync side
///
/// Published snapshots are never mutated. Every change produces a new
/// `Arc<PowerLevels>`, so a reader holding a snapshot keeps a consistent view
/// while updates land.
#[derive(Debug)]
pub struct RoomPowerLevels {
    room_id: String,
    sender: watch::Sender<Arc<PowerLevels>>,
}

impl RoomPowerLevels {
    pub fn new(room_id: impl Into<String>, power_levels: PowerLevels) -> Self {
        let (sender, _receiver) = watch::channel(Arc::new(power_levels));
        Self { room_id: room_id.into(), sender }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// The currently published snapshot
    pub fn snapshot(&self) -> Arc<PowerLevels> {
        self.sender.borrow().clone()
    }

    /// Replace the snapshot, e.g. after a new `m.room.power_levels` event
    pub fn publish(&self, power_levels: PowerLevels) {
        info!("Publishing new power levels for room {}", self.room_id);
        self.sender.send_replace(Arc::new(power_levels));
    }

    /// Change one user's level by publishing an updated copy
    pub fn set_user_power_level(&self, user_id: &str, power_level: i64) {
        debug!(
            "Setting power level of {} to {} in room {}",
            user_id, power_level, self.room_id
        );
        self.sender.send_modify(|current| {
            Arc::make_mut(current).set_user_power_level(Some(user_id), power_level);
        });
    }

    /// Receiver notified on every published change
    pub fn subscribe(&self) -> watch::Receiver<Arc<PowerLevels>> {
        self.sender.subscribe()
    }
}
