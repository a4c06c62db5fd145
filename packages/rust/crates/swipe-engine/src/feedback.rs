//! Feedback mapper: drag offset -> per-intent overlay intensity.
//!
//! Cosmetic only. Nothing in here is read by the classifier.

use serde::{Deserialize, Serialize};
use swipe_types::{CurationError, CurationResult, Intent};

/// Ramp bounds for overlay intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Offset at which an overlay starts to appear.
    pub low_bound: f64,
    /// Offset at which an overlay is fully opaque.
    pub high_bound: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            low_bound: 50.0,
            high_bound: 150.0,
        }
    }
}

impl FeedbackConfig {
    /// # Errors
    /// Returns [`CurationError::Config`] unless `0 <= low_bound < high_bound`.
    pub fn validate(self) -> CurationResult<Self> {
        let finite = self.low_bound.is_finite() && self.high_bound.is_finite();
        if !finite || self.low_bound < 0.0 || self.high_bound <= self.low_bound {
            return Err(CurationError::Config(format!(
                "feedback bounds must satisfy 0 <= low < high, got low={} high={}",
                self.low_bound, self.high_bound
            )));
        }
        Ok(self)
    }
}

/// Overlay intensity per intent, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackIntensity {
    /// Rightward overlay.
    pub private_calendar: f64,
    /// Upward overlay.
    pub public_calendar: f64,
    /// Downward overlay.
    pub save_later: f64,
    /// Leftward overlay.
    pub dismiss: f64,
}

impl FeedbackIntensity {
    /// Intensity for one intent.
    #[must_use]
    pub const fn get(&self, intent: Intent) -> f64 {
        match intent {
            Intent::PrivateCalendar => self.private_calendar,
            Intent::PublicCalendar => self.public_calendar,
            Intent::SaveLater => self.save_later,
            Intent::Dismiss => self.dismiss,
        }
    }

    /// The most lit overlay, if any is lit at all.
    #[must_use]
    pub fn strongest(&self) -> Option<(Intent, f64)> {
        Intent::ALL
            .into_iter()
            .map(|intent| (intent, self.get(intent)))
            .filter(|(_, value)| *value > 0.0)
            .fold(None, |best: Option<(Intent, f64)>, candidate| match best {
                Some(b) if b.1 >= candidate.1 => Some(b),
                _ => Some(candidate),
            })
    }

    /// True when every overlay is dark.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.strongest().is_none()
    }
}

/// Map a drag offset to overlay intensities.
///
/// Each axis pair lights only the side the offset points to; the other side
/// of the pair stays at 0.
#[must_use]
pub fn map_feedback(dx: f64, dy: f64, config: &FeedbackConfig) -> FeedbackIntensity {
    let horizontal = ramp(dx.abs(), config);
    let vertical = ramp(dy.abs(), config);
    FeedbackIntensity {
        private_calendar: if dx > 0.0 { horizontal } else { 0.0 },
        dismiss: if dx < 0.0 { horizontal } else { 0.0 },
        save_later: if dy > 0.0 { vertical } else { 0.0 },
        public_calendar: if dy < 0.0 { vertical } else { 0.0 },
    }
}

fn ramp(magnitude: f64, config: &FeedbackConfig) -> f64 {
    if !magnitude.is_finite() || magnitude <= config.low_bound {
        0.0
    } else if magnitude >= config.high_bound {
        1.0
    } else {
        (magnitude - config.low_bound) / (config.high_bound - config.low_bound)
    }
}
