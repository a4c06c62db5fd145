//! End-to-end gesture scenarios through `SwipeSession`.

use std::sync::Arc;

use swipe_engine::{
    EngineConfig, NoopDecisionSink, SampleOutcome, StackPhase, SwipeSession,
};
use swipe_events::{EventBus, topics};
use swipe_session::TrackerHandle;
use swipe_types::{GestureSample, Intent, Item};

fn session_with(ids: &[&str]) -> (SwipeSession, EventBus) {
    let bus = EventBus::new(64);
    let mut session = SwipeSession::new(
        &EngineConfig::default(),
        TrackerHandle::new("scenario"),
        Arc::new(NoopDecisionSink),
        bus.clone(),
    );
    session.append_items(ids.iter().map(|id| Item::bare(*id)));
    (session, bus)
}

fn drag_and_release(session: &mut SwipeSession, dx: f64, dy: f64, vx: f64, vy: f64) -> SampleOutcome {
    let steps = 4_u32;
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        let outcome = session.handle_sample(GestureSample::moving(dx * t, dy * t));
        assert!(matches!(outcome, SampleOutcome::Tracking { .. }));
    }
    session.handle_sample(GestureSample::ended(dx, dy, vx, vy))
}

fn committed_intent(outcome: &SampleOutcome) -> Option<Intent> {
    match outcome {
        SampleOutcome::Committed { decision, .. } => Some(decision.intent),
        _ => None,
    }
}

#[test]
fn test_right_drag_commits_private_calendar() {
    let (mut session, _bus) = session_with(&["a", "b"]);
    let outcome = drag_and_release(&mut session, 160.0, 10.0, 0.0, 0.0);
    assert_eq!(committed_intent(&outcome), Some(Intent::PrivateCalendar));

    assert_eq!(session.stack().active_item().map(|i| i.id.as_str()), Some("b"));
    let stats = session.tracker().get_stats();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.count(Intent::PrivateCalendar), 1);
    assert!(session.tracker().has_performed_calendar_action());
}

#[test]
fn test_up_drag_commits_public_calendar() {
    let (mut session, _bus) = session_with(&["a", "b"]);
    let outcome = drag_and_release(&mut session, 10.0, -160.0, 0.0, 0.0);
    assert_eq!(committed_intent(&outcome), Some(Intent::PublicCalendar));

    assert_eq!(session.stack().active_item().map(|i| i.id.as_str()), Some("b"));
    let stats = session.tracker().get_stats();
    assert_eq!(stats.count(Intent::PublicCalendar), 1);
    assert_eq!(stats.total, 1);
    assert!(session.tracker().has_performed_calendar_action());
}

#[test]
fn test_short_release_snaps_back_without_side_effects() {
    let (mut session, bus) = session_with(&["a", "b"]);
    let mut rx = bus.subscribe();
    let before_stack = session.stack().snapshot();
    let before_stats = session.tracker().get_stats();

    let outcome = drag_and_release(&mut session, 10.0, 10.0, 0.0, 0.0);
    assert_eq!(
        outcome,
        SampleOutcome::SnappedBack {
            item_id: "a".to_string()
        }
    );

    assert_eq!(session.stack().snapshot(), before_stack);
    assert_eq!(session.tracker().get_stats(), before_stats);
    assert!(session.gesture_item().is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_platform_cancel_is_pure() {
    let (mut session, bus) = session_with(&["a"]);
    let mut rx = bus.subscribe();
    let before_stack = session.stack().snapshot();

    session.handle_sample(GestureSample::moving(400.0, 0.0));
    let outcome = session.handle_sample(GestureSample::cancelled(400.0, 0.0));
    assert!(matches!(outcome, SampleOutcome::SnappedBack { .. }));

    assert_eq!(session.stack().snapshot(), before_stack);
    assert!(session.tracker().is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_fast_flick_commits_below_distance_threshold() {
    let (mut session, _bus) = session_with(&["a", "b"]);
    let outcome = drag_and_release(&mut session, -40.0, 0.0, -1200.0, 0.0);
    assert_eq!(committed_intent(&outcome), Some(Intent::Dismiss));

    let (mut session, _bus) = session_with(&["a", "b"]);
    let outcome = drag_and_release(&mut session, 40.0, 0.0, 1200.0, 0.0);
    assert_eq!(committed_intent(&outcome), Some(Intent::PrivateCalendar));
}

#[test]
fn test_three_save_later_exhaust_once() {
    let (mut session, bus) = session_with(&["a", "b", "c"]);
    let mut rx = bus.subscribe();

    for _ in 0..3 {
        let outcome = drag_and_release(&mut session, 0.0, 170.0, 0.0, 0.0);
        assert_eq!(committed_intent(&outcome), Some(Intent::SaveLater));
    }
    assert_eq!(session.phase(), StackPhase::Exhausted);
    assert!(!session.tracker().has_performed_calendar_action());
    assert!(session.tracker().has_performed_any_action());

    let mut empty_events = 0;
    while let Ok(event) = rx.try_recv() {
        if event.topic == topics::STACK_EMPTY {
            empty_events += 1;
        }
    }
    assert_eq!(empty_events, 1);

    // Gestures on an exhausted stack do nothing.
    assert_eq!(
        session.handle_sample(GestureSample::moving(10.0, 0.0)),
        SampleOutcome::NoActiveItem
    );
}

#[test]
fn test_replenish_after_exhaustion_reactivates() {
    let (mut session, _bus) = session_with(&["a"]);
    drag_and_release(&mut session, 200.0, 0.0, 0.0, 0.0);
    assert_eq!(session.phase(), StackPhase::Exhausted);

    let accepted = session.append_items([Item::bare("x"), Item::bare("y")]);
    assert_eq!(accepted, 2);
    assert_eq!(session.phase(), StackPhase::Active);
    let window = session.stack().visible_items().len();
    assert_eq!(window, 2.min(session.stack().visible_window()));
}

#[test]
fn test_classification_is_deterministic_across_sessions() {
    let releases = [
        (160.0, 10.0, 0.0, 0.0),
        (10.0, -160.0, 0.0, 0.0),
        (-40.0, 0.0, -1200.0, 0.0),
        (0.0, 30.0, 0.0, 900.0),
        (10.0, 10.0, 0.0, 0.0),
    ];
    let run = || {
        let (mut session, _bus) = session_with(&["a", "b", "c", "d", "e", "f"]);
        releases
            .iter()
            .map(|&(dx, dy, vx, vy)| committed_intent(&drag_and_release(&mut session, dx, dy, vx, vy)))
            .collect::<Vec<_>>()
    };
    let first = run();
    assert_eq!(first, run());
    assert_eq!(
        first,
        vec![
            Some(Intent::PrivateCalendar),
            Some(Intent::PublicCalendar),
            Some(Intent::Dismiss),
            Some(Intent::SaveLater),
            None,
        ]
    );
}

#[test]
fn test_feedback_does_not_touch_state() {
    let (mut session, _bus) = session_with(&["a", "b"]);
    let before = session.stack().snapshot();
    for dx in [0.0, 60.0, 120.0, 300.0, -300.0] {
        let intensity = session.feedback_for(dx, 0.0);
        assert!(intensity.private_calendar.abs() <= 1.0);
    }
    assert_eq!(session.stack().snapshot(), before);
    assert!(session.tracker().is_empty());

    let outcome = session.handle_sample(GestureSample::moving(100.0, 0.0));
    let SampleOutcome::Tracking { feedback, .. } = outcome else {
        panic!("expected tracking, got {outcome:?}");
    };
    assert!((feedback.private_calendar - 0.5).abs() < 1e-9);
    assert!(feedback.dismiss.abs() < f64::EPSILON);
}

#[test]
fn test_committed_decision_carries_gesture_metrics() {
    let (mut session, _bus) = session_with(&["a"]);
    let outcome = drag_and_release(&mut session, 300.0, 0.0, 0.0, 0.0);
    let SampleOutcome::Committed { decision, exhausted } = outcome else {
        panic!("expected commit, got {outcome:?}");
    };
    assert!(exhausted);
    let metrics = decision.metrics.expect("metrics attached");
    assert_eq!(metrics.sample_count, 5);
    assert!((metrics.confidence - 1.0).abs() < 1e-9);
}
