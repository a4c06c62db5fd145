//! Engine configuration: resolved thresholds and the layered YAML loader.

mod settings;

pub use settings::{
    ClassifierSettings, CurationSettings, EngagementSettings, EventSettings, FeedbackSettings,
    StackSettings, curation_settings_paths, load_curation_settings,
    load_curation_settings_from_paths, parse_curation_settings, set_config_home_override,
};

use swipe_events::DEFAULT_BUS_CAPACITY;
use swipe_session::EngagementThresholds;
use swipe_types::{CurationError, CurationResult};

use crate::classifier::ClassifierConfig;
use crate::feedback::FeedbackConfig;
use crate::stack::StackConfig;

/// Fully resolved engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Commit thresholds.
    pub classifier: ClassifierConfig,
    /// Overlay ramp bounds.
    pub feedback: FeedbackConfig,
    /// Look-ahead window.
    pub stack: StackConfig,
    /// Engagement buckets.
    pub engagement: EngagementThresholds,
    /// Event bus capacity.
    pub bus_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            feedback: FeedbackConfig::default(),
            stack: StackConfig::default(),
            engagement: EngagementThresholds::default(),
            bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Validate every section.
    ///
    /// # Errors
    /// Returns the first [`CurationError::Config`] found.
    pub fn validate(self) -> CurationResult<Self> {
        self.classifier.validate()?;
        self.feedback.validate()?;
        self.stack.validate()?;
        self.engagement.validate()?;
        if self.bus_capacity == 0 {
            return Err(CurationError::Config(
                "events.bus_capacity must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    /// Load layered settings from the default locations, resolve and validate.
    ///
    /// # Errors
    /// Returns [`CurationError::Config`] when the merged values are unusable.
    pub fn load() -> CurationResult<Self> {
        load_curation_settings().resolve().validate()
    }
}
