//! Geometry classifier: drag vector + velocity -> pending / cancel / intent.
//!
//! Pure and allocation-free; safe to call once per rendered frame.

use serde::{Deserialize, Serialize};
use swipe_types::{
    Classification, CurationError, CurationResult, GesturePhase, GestureSample, Intent,
};

/// Thresholds that decide whether a released gesture commits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Offset along the dominant axis that commits on release.
    pub distance_threshold: f64,
    /// Velocity along the dominant axis that commits on release (flick).
    pub velocity_threshold: f64,
    /// Horizontal wins only when `|dx| > |dy| * ratio`.
    pub axis_dominance_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 150.0,
            velocity_threshold: 800.0,
            axis_dominance_ratio: 1.0,
        }
    }
}

impl ClassifierConfig {
    /// Reject thresholds that would make classification meaningless.
    ///
    /// # Errors
    /// Returns [`CurationError::Config`] for non-finite or negative
    /// thresholds, or a non-positive dominance ratio.
    pub fn validate(self) -> CurationResult<Self> {
        if !(self.distance_threshold.is_finite() && self.distance_threshold >= 0.0) {
            return Err(CurationError::Config(format!(
                "classifier.distance_threshold must be finite and >= 0, got {}",
                self.distance_threshold
            )));
        }
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold >= 0.0) {
            return Err(CurationError::Config(format!(
                "classifier.velocity_threshold must be finite and >= 0, got {}",
                self.velocity_threshold
            )));
        }
        if !(self.axis_dominance_ratio.is_finite() && self.axis_dominance_ratio > 0.0) {
            return Err(CurationError::Config(format!(
                "classifier.axis_dominance_ratio must be finite and > 0, got {}",
                self.axis_dominance_ratio
            )));
        }
        Ok(self)
    }
}

/// Axis a gesture is judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left/right.
    Horizontal,
    /// Up/down.
    Vertical,
}

/// Dominant axis of an offset. Ties (and near-diagonals within the ratio)
/// go to the vertical axis.
#[must_use]
pub fn dominant_axis(dx: f64, dy: f64, axis_dominance_ratio: f64) -> Axis {
    if dx.abs() > dy.abs() * axis_dominance_ratio {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Fixed axis-direction mapping. Positive `dy` points down.
#[must_use]
pub const fn intent_for(axis: Axis, positive: bool) -> Intent {
    match (axis, positive) {
        (Axis::Horizontal, true) => Intent::PrivateCalendar,
        (Axis::Horizontal, false) => Intent::Dismiss,
        (Axis::Vertical, true) => Intent::SaveLater,
        (Axis::Vertical, false) => Intent::PublicCalendar,
    }
}

/// Classify one sample.
///
/// `move` samples are always pending, `cancel` samples and malformed
/// (non-finite) samples always cancel. On `end` the gesture commits when
/// the dominant-axis offset or the velocity along it exceeds its threshold.
#[must_use]
pub fn classify(sample: &GestureSample, config: &ClassifierConfig) -> Classification {
    if !sample.is_finite() {
        return Classification::Cancel;
    }
    match sample.phase {
        GesturePhase::Move => Classification::Pending,
        GesturePhase::Cancel => Classification::Cancel,
        GesturePhase::End => resolve(sample, config)
            .map_or(Classification::Cancel, |(intent, _)| {
                Classification::Commit(intent)
            }),
    }
}

/// Confidence in [0, 1] of a committing release, `None` when it would not commit.
///
/// Half-way at the threshold, saturating at twice the threshold.
#[must_use]
pub fn commit_confidence(sample: &GestureSample, config: &ClassifierConfig) -> Option<f64> {
    if !sample.is_finite() || sample.phase != GesturePhase::End {
        return None;
    }
    resolve(sample, config).map(|(_, confidence)| confidence)
}

fn resolve(sample: &GestureSample, config: &ClassifierConfig) -> Option<(Intent, f64)> {
    let axis = dominant_axis(sample.dx, sample.dy, config.axis_dominance_ratio);
    let (offset, velocity) = match axis {
        Axis::Horizontal => (sample.dx, sample.vx),
        Axis::Vertical => (sample.dy, sample.vy),
    };

    // Direction comes from the offset; a flick from rest falls back to velocity.
    let sign = if offset != 0.0 {
        offset.signum()
    } else if velocity != 0.0 {
        velocity.signum()
    } else {
        return None;
    };

    let distance = offset.abs();
    // A fling back towards the origin does not support the commit.
    let speed = if velocity * sign > 0.0 {
        velocity.abs()
    } else {
        0.0
    };

    if distance <= config.distance_threshold && speed <= config.velocity_threshold {
        return None;
    }

    let strength = ratio(distance, config.distance_threshold)
        .max(ratio(speed, config.velocity_threshold));
    Some((intent_for(axis, sign > 0.0), (strength / 2.0).clamp(0.0, 1.0)))
}

fn ratio(value: f64, threshold: f64) -> f64 {
    if threshold > 0.0 {
        value / threshold
    } else if value > 0.0 {
        2.0
    } else {
        0.0
    }
}
