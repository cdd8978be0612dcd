use std::sync::Arc;

use matryx_power_levels::{PowerLevels, RoomPowerLevels};

const ROOM: &str = "!abc:example.org";

#[tokio::test]
async fn test_reader_task_observes_published_levels() {
    let room = RoomPowerLevels::new(ROOM, PowerLevels::default());
    let mut receiver = room.subscribe();

    let reader = tokio::spawn(async move {
        receiver.changed().await.unwrap();
        let snapshot: Arc<PowerLevels> = receiver.borrow_and_update().clone();
        snapshot.may_send_message("@carol:example.org")
    });

    let mut next = PowerLevels::default();
    next.events_default = 10;
    room.publish(next);

    assert!(!reader.await.unwrap());
    assert_eq!(room.snapshot().events_default, 10);
}

#[test]
fn test_snapshots_are_stable_across_updates() {
    let room = RoomPowerLevels::new(ROOM, PowerLevels::new_with_creator("@bob:example.org"));
    let held = room.snapshot();

    room.set_user_power_level("@bob:example.org", 0);
    room.set_user_power_level("@carol:example.org", 100);

    assert_eq!(held.user_power_level("@bob:example.org"), 100);
    assert_eq!(held.user_power_level("@carol:example.org"), 0);

    let current = room.snapshot();
    assert_eq!(current.user_power_level("@bob:example.org"), 0);
    assert_eq!(current.user_power_level("@carol:example.org"), 100);
}
