//! Committed decisions.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Intent;

/// Measurements of the gesture that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct GestureMetrics {
    /// Time from first sample to release, in milliseconds.
    pub duration_ms: u64,
    /// Number of samples observed, release included.
    pub sample_count: u32,
    /// Highest velocity magnitude seen during the gesture.
    pub peak_speed: f64,
    /// How decisively the gesture crossed its threshold, in [0, 1].
    pub confidence: f64,
}

/// An immutable record that `item_id` was resolved to `intent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Decision {
    /// Item this decision belongs to.
    pub item_id: String,
    /// Resolved intent.
    pub intent: Intent,
    /// Commit timestamp.
    pub committed_at: DateTime<Utc>,
    /// Gesture measurements, when the decision came from a tracked gesture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<GestureMetrics>,
}

impl Decision {
    /// Create a decision stamped with the current time.
    pub fn new(item_id: impl Into<String>, intent: Intent) -> Self {
        Self {
            item_id: item_id.into(),
            intent,
            committed_at: Utc::now(),
            metrics: None,
        }
    }

    /// Attach gesture measurements.
    #[must_use]
    pub fn with_metrics(mut self, metrics: GestureMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}
