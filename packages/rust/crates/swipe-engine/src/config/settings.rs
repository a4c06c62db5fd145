//! Layered settings loader for the swipe engine.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/swipe.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/swipe-curation/settings.yaml`
//!
//! Merge precedence is user over system, field by field.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;
use swipe_session::EngagementThresholds;
use swipe_types::{CurationError, CurationResult};

use super::EngineConfig;
use crate::classifier::ClassifierConfig;
use crate::feedback::FeedbackConfig;
use crate::stack::StackConfig;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/swipe.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "swipe-curation/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Raw settings file contents; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurationSettings {
    /// Classifier thresholds.
    #[serde(default)]
    pub classifier: ClassifierSettings,
    /// Overlay ramp.
    #[serde(default)]
    pub feedback: FeedbackSettings,
    /// Stack sizing.
    #[serde(default)]
    pub stack: StackSettings,
    /// Engagement buckets.
    #[serde(default)]
    pub engagement: EngagementSettings,
    /// Event bus.
    #[serde(default)]
    pub events: EventSettings,
}

/// `classifier:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierSettings {
    /// Commit distance.
    pub distance_threshold: Option<f64>,
    /// Commit velocity.
    pub velocity_threshold: Option<f64>,
    /// Horizontal dominance ratio.
    pub axis_dominance_ratio: Option<f64>,
}

/// `feedback:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackSettings {
    /// Offset where overlays start.
    pub low_bound: Option<f64>,
    /// Offset where overlays saturate.
    pub high_bound: Option<f64>,
}

/// `stack:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackSettings {
    /// Look-ahead window.
    pub visible_window: Option<usize>,
}

/// `engagement:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngagementSettings {
    /// Lower bound of `minimal`.
    pub minimal: Option<u64>,
    /// Lower bound of `moderate`.
    pub moderate: Option<u64>,
    /// Lower bound of `high`.
    pub high: Option<u64>,
}

/// `events:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSettings {
    /// Broadcast capacity.
    pub bus_capacity: Option<usize>,
}

impl CurationSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            classifier: self.classifier.merge(overlay.classifier),
            feedback: self.feedback.merge(overlay.feedback),
            stack: self.stack.merge(overlay.stack),
            engagement: self.engagement.merge(overlay.engagement),
            events: self.events.merge(overlay.events),
        }
    }

    /// Fill unset fields with defaults. Does not validate.
    #[must_use]
    pub fn resolve(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            classifier: ClassifierConfig {
                distance_threshold: self
                    .classifier
                    .distance_threshold
                    .unwrap_or(defaults.classifier.distance_threshold),
                velocity_threshold: self
                    .classifier
                    .velocity_threshold
                    .unwrap_or(defaults.classifier.velocity_threshold),
                axis_dominance_ratio: self
                    .classifier
                    .axis_dominance_ratio
                    .unwrap_or(defaults.classifier.axis_dominance_ratio),
            },
            feedback: FeedbackConfig {
                low_bound: self.feedback.low_bound.unwrap_or(defaults.feedback.low_bound),
                high_bound: self
                    .feedback
                    .high_bound
                    .unwrap_or(defaults.feedback.high_bound),
            },
            stack: StackConfig {
                visible_window: self
                    .stack
                    .visible_window
                    .unwrap_or(defaults.stack.visible_window),
            },
            engagement: EngagementThresholds {
                minimal: self.engagement.minimal.unwrap_or(defaults.engagement.minimal),
                moderate: self
                    .engagement
                    .moderate
                    .unwrap_or(defaults.engagement.moderate),
                high: self.engagement.high.unwrap_or(defaults.engagement.high),
            },
            bus_capacity: self.events.bus_capacity.unwrap_or(defaults.bus_capacity),
        }
    }
}

impl ClassifierSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            distance_threshold: overlay.distance_threshold.or(self.distance_threshold),
            velocity_threshold: overlay.velocity_threshold.or(self.velocity_threshold),
            axis_dominance_ratio: overlay.axis_dominance_ratio.or(self.axis_dominance_ratio),
        }
    }
}

impl FeedbackSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            low_bound: overlay.low_bound.or(self.low_bound),
            high_bound: overlay.high_bound.or(self.high_bound),
        }
    }
}

impl StackSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            visible_window: overlay.visible_window.or(self.visible_window),
        }
    }
}

impl EngagementSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            minimal: overlay.minimal.or(self.minimal),
            moderate: overlay.moderate.or(self.moderate),
            high: overlay.high.or(self.high),
        }
    }
}

impl EventSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            bus_capacity: overlay.bus_capacity.or(self.bus_capacity),
        }
    }
}

/// Parse one settings document.
///
/// # Errors
/// Returns [`CurationError::Settings`] when the YAML does not match the schema.
pub fn parse_curation_settings(raw: &str) -> CurationResult<CurationSettings> {
    serde_yaml::from_str::<CurationSettings>(raw)
        .map_err(|error| CurationError::Settings(error.to_string()))
}

/// Load merged settings (user overrides system).
#[must_use]
pub fn load_curation_settings() -> CurationSettings {
    let (system_path, user_path) = curation_settings_paths();
    load_curation_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
#[must_use]
pub fn curation_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
#[must_use]
pub fn load_curation_settings_from_paths(system: &Path, user: &Path) -> CurationSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> CurationSettings {
    if !path.exists() {
        return CurationSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return CurationSettings::default();
        }
    };
    match parse_curation_settings(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            CurationSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override.
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
