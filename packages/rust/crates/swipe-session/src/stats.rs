//! Derived session statistics and engagement bucketing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swipe_types::{CurationError, CurationResult, Intent};

/// Coarse engagement bucket derived from the total decision count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    /// No decisions yet.
    None,
    /// A handful of decisions.
    Minimal,
    /// Steady triage.
    Moderate,
    /// Heavy triage.
    High,
}

impl EngagementLevel {
    /// String form used in payloads and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Lower bounds (inclusive) of each non-empty engagement bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementThresholds {
    /// First count that counts as `Minimal`.
    pub minimal: u64,
    /// First count that counts as `Moderate`.
    pub moderate: u64,
    /// First count that counts as `High`.
    pub high: u64,
}

impl Default for EngagementThresholds {
    fn default() -> Self {
        Self {
            minimal: 1,
            moderate: 5,
            high: 20,
        }
    }
}

impl EngagementThresholds {
    /// Bucket for a total decision count.
    #[must_use]
    pub const fn level_for(self, total: u64) -> EngagementLevel {
        if total >= self.high {
            EngagementLevel::High
        } else if total >= self.moderate {
            EngagementLevel::Moderate
        } else if total >= self.minimal {
            EngagementLevel::Minimal
        } else {
            EngagementLevel::None
        }
    }

    /// Check that buckets are non-empty and strictly increasing.
    ///
    /// # Errors
    /// Returns [`CurationError::Config`] when `minimal` is zero or the bounds
    /// are not strictly increasing.
    pub fn validate(self) -> CurationResult<Self> {
        if self.minimal == 0 {
            return Err(CurationError::Config(
                "engagement.minimal must be at least 1".to_string(),
            ));
        }
        if !(self.minimal < self.moderate && self.moderate < self.high) {
            return Err(CurationError::Config(format!(
                "engagement bounds must increase: minimal={} moderate={} high={}",
                self.minimal, self.moderate, self.high
            )));
        }
        Ok(self)
    }
}

/// Per-intent decision counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntentCounts {
    /// `PRIVATE_CALENDAR` count.
    pub private_calendar: u64,
    /// `PUBLIC_CALENDAR` count.
    pub public_calendar: u64,
    /// `SAVE_LATER` count.
    pub save_later: u64,
    /// `DISMISS` count.
    pub dismiss: u64,
}

impl IntentCounts {
    /// Count for one intent.
    #[must_use]
    pub const fn get(&self, intent: Intent) -> u64 {
        match intent {
            Intent::PrivateCalendar => self.private_calendar,
            Intent::PublicCalendar => self.public_calendar,
            Intent::SaveLater => self.save_later,
            Intent::Dismiss => self.dismiss,
        }
    }

    pub(crate) fn bump(&mut self, intent: Intent) {
        let slot = match intent {
            Intent::PrivateCalendar => &mut self.private_calendar,
            Intent::PublicCalendar => &mut self.public_calendar,
            Intent::SaveLater => &mut self.save_later,
            Intent::Dismiss => &mut self.dismiss,
        };
        *slot += 1;
    }

    /// Sum over all intents.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.private_calendar + self.public_calendar + self.save_later + self.dismiss
    }
}

/// Snapshot of the session's decisions, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Decisions per intent.
    pub counts: IntentCounts,
    /// Total decisions.
    pub total: u64,
    /// Engagement bucket for `total`.
    pub engagement: EngagementLevel,
    /// Timestamp of the most recent record.
    pub last_action_at: Option<DateTime<Utc>>,
}

impl SessionStats {
    /// Stats of an empty session.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            counts: IntentCounts::default(),
            total: 0,
            engagement: EngagementLevel::None,
            last_action_at: None,
        }
    }

    /// Count for one intent.
    #[must_use]
    pub const fn count(&self, intent: Intent) -> u64 {
        self.counts.get(intent)
    }

    /// Share of `intent` in the total, 0 when nothing was recorded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rate(&self, intent: Intent) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.counts.get(intent) as f64 / self.total as f64
        }
    }
}
