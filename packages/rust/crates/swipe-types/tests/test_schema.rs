//! Schema and wire-shape tests for the shared data model.

use swipe_types::{
    Classification, Decision, GestureSample, Intent, Item, SwipeRecord, VisibilityLevel,
};

#[test]
fn test_decision_schema_names_fields() {
    let schema = schemars::schema_for!(Decision);
    let value = serde_json::to_value(&schema).expect("serialize schema");
    let properties = &value["properties"];
    assert!(properties.get("item_id").is_some());
    assert!(properties.get("intent").is_some());
    assert!(properties.get("committed_at").is_some());
}

#[test]
fn test_swipe_record_schema_exists() {
    let schema = schemars::schema_for!(SwipeRecord);
    let value = serde_json::to_value(&schema).expect("serialize schema");
    assert!(value["properties"].get("confidence_score").is_some());
}

#[test]
fn test_sample_deserializes_from_collaborator_json() {
    let sample: GestureSample = serde_json::from_str(
        r#"{"dx": 160.0, "dy": -4.5, "vx": 320.0, "vy": 0.0, "phase": "end"}"#,
    )
    .expect("parse sample");
    assert!(sample.is_finite());
    assert!((sample.dx - 160.0).abs() < f64::EPSILON);
}

#[test]
fn test_item_payload_defaults_to_null() {
    let item: Item = serde_json::from_str(r#"{"id": "evt-9"}"#).expect("parse item");
    assert_eq!(item.id, "evt-9");
    assert!(item.payload.is_null());
}

#[test]
fn test_classification_wire_shape() {
    let value = serde_json::to_value(Classification::Commit(Intent::PublicCalendar))
        .expect("serialize classification");
    assert_eq!(value["kind"], "commit");
    assert_eq!(value["intent"], "PUBLIC_CALENDAR");
    assert_eq!(Classification::Pending.intent(), None);
}

fn stored_record(direction: &str, action: &str, invites: usize, confidence: f64) -> String {
    let invites: Vec<String> = (0..invites).map(|i| format!("friend-{i}")).collect();
    serde_json::json!({
        "event_id": "evt-10",
        "direction": direction,
        "action": action,
        "visibility": "friends",
        "calendar_type": "shared",
        "invite_friends": invites,
        "notes": null,
        "confidence_score": confidence,
        "context_data": {},
        "created_at": "2026-05-01T18:30:00Z",
    })
    .to_string()
}

#[test]
fn test_stored_record_round_trips_when_valid() {
    let record: SwipeRecord =
        serde_json::from_str(&stored_record("up", "going_shared", 2, 0.8)).expect("valid row");
    assert_eq!(record.intent(), Intent::PublicCalendar);
    assert_eq!(record.invite_friends.len(), 2);
}

#[test]
fn test_stored_record_rejects_broken_rows() {
    let rows = [
        stored_record("left", "going_shared", 0, 1.0),
        stored_record("up", "going_shared", 11, 1.0),
        stored_record("right", "going_private", 1, 1.0),
        stored_record("up", "going_shared", 0, 7.5),
    ];
    for row in rows {
        assert!(
            serde_json::from_str::<SwipeRecord>(&row).is_err(),
            "accepted {row}"
        );
    }
}

#[test]
fn test_stored_record_clamps_visibility() {
    let mut value: serde_json::Value =
        serde_json::from_str(&stored_record("up", "going_shared", 0, 1.0)).expect("json");
    value["visibility"] = "private".into();
    let record: SwipeRecord = serde_json::from_value(value).expect("valid row");
    assert_eq!(record.visibility, VisibilityLevel::Friends);
}
