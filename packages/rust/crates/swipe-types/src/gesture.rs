//! Gesture samples and the classifier's per-sample verdict.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Intent;

/// Lifecycle phase of a single drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Finger still down, gesture in progress.
    Move,
    /// Finger released.
    End,
    /// Platform interrupted the gesture.
    Cancel,
}

/// One sample from the pointer stream.
///
/// `dx`/`dy` are cumulative offsets from the gesture start; `vx`/`vy` are
/// instantaneous velocity in units per second. Positive `dy` points down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GestureSample {
    /// Horizontal offset from gesture start.
    pub dx: f64,
    /// Vertical offset from gesture start.
    pub dy: f64,
    /// Horizontal velocity.
    pub vx: f64,
    /// Vertical velocity.
    pub vy: f64,
    /// Phase this sample belongs to.
    pub phase: GesturePhase,
}

impl GestureSample {
    /// Build a sample.
    #[must_use]
    pub const fn new(dx: f64, dy: f64, vx: f64, vy: f64, phase: GesturePhase) -> Self {
        Self {
            dx,
            dy,
            vx,
            vy,
            phase,
        }
    }

    /// In-progress sample with zero velocity.
    #[must_use]
    pub const fn moving(dx: f64, dy: f64) -> Self {
        Self::new(dx, dy, 0.0, 0.0, GesturePhase::Move)
    }

    /// Release sample.
    #[must_use]
    pub const fn ended(dx: f64, dy: f64, vx: f64, vy: f64) -> Self {
        Self::new(dx, dy, vx, vy, GesturePhase::End)
    }

    /// Platform cancellation at the given offset.
    #[must_use]
    pub const fn cancelled(dx: f64, dy: f64) -> Self {
        Self::new(dx, dy, 0.0, 0.0, GesturePhase::Cancel)
    }

    /// True when every component is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }

    /// Velocity magnitude.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

/// Classifier verdict for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "intent", rename_all = "snake_case")]
pub enum Classification {
    /// Gesture still in progress; nothing decided.
    Pending,
    /// Gesture resolved without a decision; the card snaps back.
    Cancel,
    /// Gesture resolved to an intent.
    Commit(Intent),
}

impl Classification {
    /// The committed intent, if any.
    #[must_use]
    pub const fn intent(self) -> Option<Intent> {
        match self {
            Self::Commit(intent) => Some(intent),
            Self::Pending | Self::Cancel => None,
        }
    }
}
