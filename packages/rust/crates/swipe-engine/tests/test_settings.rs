#![allow(missing_docs)]

use std::path::PathBuf;

use swipe_engine::EngineConfig;
use swipe_engine::config::load_curation_settings_from_paths;
use tempfile::TempDir;

fn write_file(path: PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write yaml");
}

#[test]
fn merge_user_overrides_system() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/swipe.yaml");
    let user = tmp.path().join(".config/swipe-curation/settings.yaml");

    write_file(
        system.clone(),
        r"
classifier:
  distance_threshold: 120
  velocity_threshold: 700
feedback:
  low_bound: 40
  high_bound: 140
stack:
  visible_window: 5
engagement:
  minimal: 1
  moderate: 4
  high: 12
events:
  bus_capacity: 64
",
    );
    write_file(
        user.clone(),
        r"
classifier:
  distance_threshold: 100
stack:
  visible_window: 2
",
    );

    let config = load_curation_settings_from_paths(&system, &user)
        .resolve()
        .validate()
        .expect("valid config");

    assert!((config.classifier.distance_threshold - 100.0).abs() < f64::EPSILON);
    assert!((config.classifier.velocity_threshold - 700.0).abs() < f64::EPSILON);
    assert!((config.feedback.low_bound - 40.0).abs() < f64::EPSILON);
    assert_eq!(config.stack.visible_window, 2);
    assert_eq!(config.engagement.moderate, 4);
    assert_eq!(config.bus_capacity, 64);
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let tmp = TempDir::new().expect("tempdir");
    let config = load_curation_settings_from_paths(
        &tmp.path().join("nope/system.yaml"),
        &tmp.path().join("nope/user.yaml"),
    )
    .resolve();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn malformed_user_file_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "stack:\n  visible_window: 4\n");
    write_file(user.clone(), "stack: [this is: not, a mapping\n");

    let config = load_curation_settings_from_paths(&system, &user).resolve();
    assert_eq!(config.stack.visible_window, 4);
}

#[test]
fn inverted_feedback_bounds_fail_validation() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    write_file(system.clone(), "feedback:\n  low_bound: 200\n  high_bound: 100\n");

    let result = load_curation_settings_from_paths(&system, &tmp.path().join("absent.yaml"))
        .resolve()
        .validate();
    assert!(result.is_err());
}

#[test]
fn configured_engagement_and_bus_reach_the_session() {
    use std::sync::Arc;

    use swipe_engine::{NoopDecisionSink, SwipeSession};
    use swipe_session::EngagementLevel;
    use swipe_types::{GestureSample, Item};

    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/swipe.yaml");
    write_file(
        system.clone(),
        "engagement:\n  minimal: 1\n  moderate: 2\n  high: 3\nevents:\n  bus_capacity: 4\n",
    );
    let config = load_curation_settings_from_paths(&system, &tmp.path().join("absent.yaml"))
        .resolve()
        .validate()
        .expect("valid config");

    let mut session = SwipeSession::from_config(&config, "configured", Arc::new(NoopDecisionSink));
    assert_eq!(session.bus().capacity(), 4);
    session.append_items(["a", "b", "c"].map(Item::bare));
    for _ in 0..3 {
        session.handle_sample(GestureSample::ended(200.0, 0.0, 0.0, 0.0));
    }

    let stats = session.tracker().get_stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.engagement, EngagementLevel::High);
    assert_eq!(session.tracker().with_tracker(|t| t.thresholds()), config.engagement);
}
