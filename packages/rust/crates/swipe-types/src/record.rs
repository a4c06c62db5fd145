//! Persistence payload handed to the decision sink.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    CalendarType, CurationError, CurationResult, Decision, Intent, SwipeAction, SwipeDirection,
    VisibilityLevel,
};

/// Upper bound on friends invited from one swipe.
pub const MAX_INVITED_FRIENDS: usize = 10;
/// Upper bound on free-text notes, in characters.
pub const MAX_NOTES_CHARS: usize = 500;

/// Swipe row as the persistence collaborator stores it.
///
/// Deserialization applies the same rules as the builders, so a row read
/// back from storage is as trustworthy as one built from a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawSwipeRecord")]
pub struct SwipeRecord {
    /// Item (event) identifier.
    pub event_id: String,
    /// Physical direction.
    pub direction: SwipeDirection,
    /// Action name; always agrees with `direction`.
    pub action: SwipeAction,
    /// Audience of the resulting attendance entry.
    pub visibility: VisibilityLevel,
    /// Calendar the item is filed under, for calendar-directed swipes.
    pub calendar_type: Option<CalendarType>,
    /// Friends to invite (shared swipes only).
    #[serde(default)]
    pub invite_friends: Vec<String>,
    /// Optional free-text note.
    pub notes: Option<String>,
    /// Confidence in [0, 1].
    pub confidence_score: f64,
    /// Gesture context for downstream analytics.
    #[serde(default)]
    pub context_data: Value,
    /// Commit time of the underlying decision.
    pub created_at: DateTime<Utc>,
}

/// Unchecked wire shape of [`SwipeRecord`].
#[derive(Deserialize)]
struct RawSwipeRecord {
    event_id: String,
    direction: SwipeDirection,
    action: SwipeAction,
    visibility: Option<VisibilityLevel>,
    calendar_type: Option<CalendarType>,
    #[serde(default)]
    invite_friends: Vec<String>,
    notes: Option<String>,
    confidence_score: Option<f64>,
    #[serde(default)]
    context_data: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<RawSwipeRecord> for SwipeRecord {
    type Error = CurationError;

    fn try_from(raw: RawSwipeRecord) -> CurationResult<Self> {
        let intent = Intent::from_pair(raw.direction, raw.action)?;
        let confidence_score = raw.confidence_score.unwrap_or(1.0);
        if !(0.0..=1.0).contains(&confidence_score) {
            return Err(CurationError::InvalidRecord(format!(
                "confidence_score must be within [0, 1], got {confidence_score}"
            )));
        }
        let mut record = Self {
            event_id: raw.event_id,
            direction: raw.direction,
            action: raw.action,
            visibility: intent.default_visibility(),
            calendar_type: raw.calendar_type.or(intent.calendar_type()),
            invite_friends: Vec::new(),
            notes: None,
            confidence_score,
            context_data: raw.context_data,
            created_at: raw.created_at,
        }
        .with_invites(raw.invite_friends)?;
        if let Some(visibility) = raw.visibility {
            record = record.with_visibility(visibility);
        }
        if let Some(notes) = raw.notes {
            record = record.with_notes(notes)?;
        }
        Ok(record)
    }
}

impl SwipeRecord {
    /// Build the record for a decision with intent-derived defaults.
    #[must_use]
    pub fn from_decision(decision: &Decision) -> Self {
        let intent = decision.intent;
        let (confidence_score, context_data) = match decision.metrics {
            Some(m) => (
                m.confidence.clamp(0.0, 1.0),
                json!({
                    "swipe_speed_ms": m.duration_ms,
                    "sample_count": m.sample_count,
                    "peak_speed": m.peak_speed,
                }),
            ),
            None => (1.0, json!({})),
        };
        Self {
            event_id: decision.item_id.clone(),
            direction: intent.direction(),
            action: intent.action(),
            visibility: intent.default_visibility(),
            calendar_type: intent.calendar_type(),
            invite_friends: Vec::new(),
            notes: None,
            confidence_score,
            context_data,
            created_at: decision.committed_at,
        }
    }

    /// Intent encoded by this record.
    #[must_use]
    pub const fn intent(&self) -> Intent {
        Intent::from_action(self.action)
    }

    /// Override the audience. Shared swipes never go below `Friends`, private
    /// swipes are never widened to `Friends`.
    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityLevel) -> Self {
        self.visibility = match (self.intent(), visibility) {
            (Intent::PublicCalendar, VisibilityLevel::Private) => VisibilityLevel::Friends,
            (Intent::PrivateCalendar, VisibilityLevel::Friends) => VisibilityLevel::Private,
            (_, v) => v,
        };
        self
    }

    /// Attach friend invitations.
    ///
    /// # Errors
    /// Invitations are only valid on shared swipes and limited to
    /// [`MAX_INVITED_FRIENDS`].
    pub fn with_invites(mut self, friends: Vec<String>) -> CurationResult<Self> {
        if friends.is_empty() {
            self.invite_friends = friends;
            return Ok(self);
        }
        if self.intent() != Intent::PublicCalendar {
            return Err(CurationError::InvalidRecord(
                "friend invitations only allowed for shared events".to_string(),
            ));
        }
        if friends.len() > MAX_INVITED_FRIENDS {
            return Err(CurationError::InvalidRecord(format!(
                "cannot invite more than {MAX_INVITED_FRIENDS} friends per event"
            )));
        }
        self.invite_friends = friends;
        Ok(self)
    }

    /// Attach a note.
    ///
    /// # Errors
    /// Notes longer than [`MAX_NOTES_CHARS`] characters are rejected.
    pub fn with_notes(mut self, notes: impl Into<String>) -> CurationResult<Self> {
        let notes = notes.into();
        if notes.chars().count() > MAX_NOTES_CHARS {
            return Err(CurationError::InvalidRecord(format!(
                "notes exceed {MAX_NOTES_CHARS} characters"
            )));
        }
        self.notes = Some(notes);
        Ok(self)
    }

    /// Whether persisting this record should also mark the user as going.
    #[must_use]
    pub const fn marks_attendance(&self) -> bool {
        self.intent().is_calendar_directed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GestureMetrics;

    #[test]
    fn test_record_follows_intent() {
        let decision = Decision::new("evt-1", Intent::PublicCalendar);
        let record = SwipeRecord::from_decision(&decision);
        assert_eq!(record.direction, SwipeDirection::Up);
        assert_eq!(record.action, SwipeAction::GoingShared);
        assert_eq!(record.visibility, VisibilityLevel::Friends);
        assert_eq!(record.calendar_type, Some(CalendarType::Shared));
        assert!(record.marks_attendance());
        assert!((record.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_flow_into_context() {
        let decision = Decision::new("evt-2", Intent::Dismiss).with_metrics(GestureMetrics {
            duration_ms: 180,
            sample_count: 12,
            peak_speed: 1400.0,
            confidence: 0.75,
        });
        let record = SwipeRecord::from_decision(&decision);
        assert_eq!(record.context_data["swipe_speed_ms"], 180);
        assert!((record.confidence_score - 0.75).abs() < f64::EPSILON);
        assert!(!record.marks_attendance());
    }

    #[test]
    fn test_invites_only_on_shared() {
        let private = SwipeRecord::from_decision(&Decision::new("evt-3", Intent::PrivateCalendar));
        assert!(private.with_invites(vec!["u1".to_string()]).is_err());

        let shared = SwipeRecord::from_decision(&Decision::new("evt-4", Intent::PublicCalendar));
        let too_many = (0..=MAX_INVITED_FRIENDS).map(|i| format!("u{i}")).collect();
        assert!(shared.clone().with_invites(too_many).is_err());
        let ok = shared
            .with_invites(vec!["u1".to_string(), "u2".to_string()])
            .expect("two invites are allowed");
        assert_eq!(ok.invite_friends.len(), 2);
    }

    #[test]
    fn test_visibility_clamped_by_intent() {
        let shared = SwipeRecord::from_decision(&Decision::new("evt-5", Intent::PublicCalendar))
            .with_visibility(VisibilityLevel::Private);
        assert_eq!(shared.visibility, VisibilityLevel::Friends);

        let private = SwipeRecord::from_decision(&Decision::new("evt-6", Intent::PrivateCalendar))
            .with_visibility(VisibilityLevel::Friends);
        assert_eq!(private.visibility, VisibilityLevel::Private);
    }

    #[test]
    fn test_notes_length_limit() {
        let record = SwipeRecord::from_decision(&Decision::new("evt-7", Intent::SaveLater));
        assert!(record.clone().with_notes("x".repeat(MAX_NOTES_CHARS)).is_ok());
        assert!(record.with_notes("x".repeat(MAX_NOTES_CHARS + 1)).is_err());
    }
}
