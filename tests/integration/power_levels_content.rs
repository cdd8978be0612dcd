use pretty_assertions::assert_eq;
use serde_json::json;

use matryx_power_levels::{
    event_type, Error, NotificationFallback, PowerLevelAction, PowerLevels, PowerLevelsError,
};

// Content shaped like a real room's m.room.power_levels state event
fn room_content() -> serde_json::Value {
    json!({
        "ban": 50,
        "events": {
            "m.room.avatar": 50,
            "m.room.canonical_alias": 50,
            "m.room.history_visibility": 100,
            "m.room.name": 50,
            "m.room.power_levels": 100,
            "m.room.message": 50,
            "m.reaction": 0
        },
        "events_default": 0,
        "invite": 0,
        "kick": 50,
        "notifications": { "room": 50 },
        "redact": 50,
        "state_default": 50,
        "users": {
            "@bob:example.org": 100,
            "@mod:example.org": 50
        },
        "users_default": 0
    })
}

#[test]
fn test_unset_fields_take_protocol_defaults() {
    let levels = PowerLevels::from_json_str(r#"{ "users": { "@bob:example.org": 100 } }"#).unwrap();

    assert_eq!(
        (levels.ban, levels.kick, levels.invite, levels.redact),
        (50, 50, 50, 50)
    );
    assert_eq!(levels.events_default, 0);
    assert_eq!(levels.users_default, 0);
    assert_eq!(levels.state_default, 50);
}

#[test]
fn test_message_gating_end_to_end() {
    let levels = PowerLevels::from_json_value(json!({
        "users": { "bob": 100 },
        "events": { "m.room.message": 50 },
    }))
    .unwrap();

    assert!(levels.may_send_message("bob"));
    assert!(!levels.may_send_message("carol"));
}

#[test]
fn test_room_content() {
    let levels = PowerLevels::from_json_value(room_content()).unwrap();
    let bob = "@bob:example.org";
    let moderator = "@mod:example.org";
    let guest = "@guest:example.org";

    assert!(levels.may_send_message(moderator));
    assert!(!levels.may_send_message(guest));
    assert!(levels.may_send_event_of_type(event_type::REACTION, guest));
    assert!(levels.may_send_event_of_type(event_type::ENCRYPTED, guest));

    assert!(levels.may_send_state_event(event_type::STATE_ROOM_NAME, moderator));
    assert!(levels.may_send_state_event(event_type::STATE_ROOM_TOPIC, moderator));
    assert!(!levels.may_send_state_event(event_type::STATE_POWER_LEVELS, moderator));
    assert!(levels.may_send_state_event(event_type::STATE_POWER_LEVELS, bob));

    assert!(levels.user_may(PowerLevelAction::Kick, moderator));
    assert!(levels.user_may(PowerLevelAction::Invite, guest));
    assert!(!levels.user_may(PowerLevelAction::Ban, guest));

    assert_eq!(levels.notification_level(Some("room")).unwrap(), 50);
}

#[test]
fn test_promotion_after_moderation() {
    let mut levels = PowerLevels::from_json_value(room_content()).unwrap();
    let guest = "@guest:example.org";

    assert!(!levels.may_send_message(guest));
    levels.set_user_power_level(Some(guest), 50);
    assert!(levels.may_send_message(guest));
    assert!(levels.user_may(PowerLevelAction::Redact, guest));

    levels.set_user_power_level(Some(guest), -1);
    assert!(!levels.may_send_event_of_type(event_type::REACTION, guest));
}

#[test]
fn test_legacy_string_levels() {
    let levels = PowerLevels::from_json_value(json!({
        "ban": "75",
        "users": { "@bob:example.org": "100" },
        "notifications": { "room": "5", "broken": "five" },
    }))
    .unwrap();

    assert_eq!(levels.ban, 75);
    assert_eq!(levels.user_power_level("@bob:example.org"), 100);
    assert_eq!(levels.notification_level(Some("room")).unwrap(), 5);
    assert_eq!(levels.notification_level(Some("missing")).unwrap(), 50);

    match levels.notification_level(Some("broken")) {
        Err(Error::PowerLevels(PowerLevelsError::InvalidNotificationLevel { key, value, .. })) => {
            assert_eq!(key, "broken");
            assert_eq!(value, "five");
        },
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(
        levels
            .notification_level_with_policy(Some("broken"), NotificationFallback::Default)
            .unwrap(),
        50
    );
}
