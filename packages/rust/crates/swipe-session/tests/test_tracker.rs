//! Integration tests for the session interaction tracker.

use std::thread;

use swipe_session::{EngagementLevel, EngagementThresholds, InteractionTracker, TrackerHandle};
use swipe_types::{Decision, Intent};

#[test]
fn test_calendar_predicate_is_monotonic() {
    let mut t = InteractionTracker::new("s1");
    assert!(!t.has_performed_calendar_action());

    t.record(Intent::SaveLater);
    t.record(Intent::Dismiss);
    assert!(!t.has_performed_calendar_action());
    assert!(t.has_performed_any_action());

    t.record(Intent::PrivateCalendar);
    assert!(t.has_performed_calendar_action());

    for _ in 0..10 {
        t.record(Intent::Dismiss);
        t.record(Intent::SaveLater);
        assert!(t.has_performed_calendar_action());
    }
}

#[test]
fn test_public_calendar_also_counts() {
    let mut t = InteractionTracker::new("s1");
    t.record(Intent::PublicCalendar);
    assert!(t.has_performed_calendar_action());
}

#[test]
fn test_engagement_walks_buckets() {
    let mut t = InteractionTracker::new("s1");
    assert_eq!(t.get_stats().engagement, EngagementLevel::None);
    let mut seen = Vec::new();
    for _ in 0..20 {
        t.record(Intent::Dismiss);
        let level = t.get_stats().engagement;
        if seen.last() != Some(&level) {
            seen.push(level);
        }
    }
    assert_eq!(
        seen,
        vec![
            EngagementLevel::Minimal,
            EngagementLevel::Moderate,
            EngagementLevel::High
        ]
    );
}

#[test]
fn test_custom_thresholds() {
    let thresholds = EngagementThresholds {
        minimal: 2,
        moderate: 3,
        high: 4,
    };
    let mut t = InteractionTracker::with_thresholds("s1", thresholds);
    t.record(Intent::Dismiss);
    assert_eq!(t.get_stats().engagement, EngagementLevel::None);
    t.record(Intent::Dismiss);
    assert_eq!(t.get_stats().engagement, EngagementLevel::Minimal);
}

#[test]
fn test_record_decision_keeps_item_id() {
    let mut t = InteractionTracker::new("s1");
    let decision = Decision::new("evt-1", Intent::SaveLater);
    t.record_decision(&decision);
    let slot = &t.recent(1)[0];
    assert_eq!(slot.item_id.as_deref(), Some("evt-1"));
    assert_eq!(slot.recorded_at, decision.committed_at);
    assert_eq!(t.get_stats().last_action_at, Some(decision.committed_at));
}

#[test]
fn test_handle_shares_state_across_threads() {
    let handle = TrackerHandle::new("s1");
    let writer = handle.clone();
    thread::spawn(move || {
        writer.record(Intent::PublicCalendar);
        writer.record(Intent::Dismiss);
    })
    .join()
    .expect("writer thread");

    assert_eq!(handle.len(), 2);
    assert!(handle.has_performed_calendar_action());
    let stats = handle.get_stats();
    assert!((stats.rate(Intent::Dismiss) - 0.5).abs() < f64::EPSILON);
    assert_eq!(handle.session_id(), "s1");

    assert_eq!(handle.reset(), 2);
    assert!(!handle.has_performed_any_action());
    assert!(!handle.has_performed_calendar_action());
}

#[test]
fn test_stats_serialize() {
    let mut t = InteractionTracker::new("s1");
    t.record(Intent::PrivateCalendar);
    let value = serde_json::to_value(t.get_stats()).expect("serialize stats");
    assert_eq!(value["counts"]["private_calendar"], 1);
    assert_eq!(value["engagement"], "minimal");
}
