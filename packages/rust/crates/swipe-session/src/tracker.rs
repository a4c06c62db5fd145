//! Interaction tracker: append-only log of committed intents.

use swipe_types::{Decision, Intent};

use crate::{EngagementThresholds, InteractionSlot, IntentCounts, SessionStats};

/// Session-scoped decision log. O(1) append, stats recomputed on read.
///
/// Entries are never dropped while the session lives; only [`reset`](Self::reset)
/// clears them. That is what keeps the calendar predicate monotonic.
#[derive(Debug, Clone)]
pub struct InteractionTracker {
    session_id: String,
    log: Vec<InteractionSlot>,
    thresholds: EngagementThresholds,
}

impl InteractionTracker {
    /// Create an empty tracker with default engagement thresholds.
    #[must_use]
    pub fn new(session_id: &str) -> Self {
        Self::with_thresholds(session_id, EngagementThresholds::default())
    }

    /// Create an empty tracker with explicit engagement thresholds.
    #[must_use]
    pub fn with_thresholds(session_id: &str, thresholds: EngagementThresholds) -> Self {
        Self {
            session_id: session_id.to_string(),
            log: Vec::new(),
            thresholds,
        }
    }

    /// Append one intent. Never rejects input.
    pub fn record(&mut self, intent: Intent) {
        self.log.push(InteractionSlot::new(intent));
    }

    /// Append a committed decision, keeping its item id and commit time.
    pub fn record_decision(&mut self, decision: &Decision) {
        self.log.push(InteractionSlot::from_decision(decision));
    }

    /// Aggregate statistics over the whole log.
    #[must_use]
    pub fn get_stats(&self) -> SessionStats {
        let mut counts = IntentCounts::default();
        let mut last_action_at = None;
        for slot in &self.log {
            counts.bump(slot.intent);
            last_action_at = Some(match last_action_at {
                Some(prev) if prev > slot.recorded_at => prev,
                _ => slot.recorded_at,
            });
        }
        let total = counts.total();
        SessionStats {
            counts,
            total,
            engagement: self.thresholds.level_for(total),
            last_action_at,
        }
    }

    /// True once any calendar-directed intent was recorded this session.
    #[must_use]
    pub fn has_performed_calendar_action(&self) -> bool {
        self.log.iter().any(|slot| slot.intent.is_calendar_directed())
    }

    /// True once anything was recorded this session.
    #[must_use]
    pub fn has_performed_any_action(&self) -> bool {
        !self.log.is_empty()
    }

    /// Clear the log. Returns the number of entries dropped.
    pub fn reset(&mut self) -> usize {
        let cleared = self.log.len();
        self.log.clear();
        tracing::info!(session_id = %self.session_id, cleared, "interaction log reset");
        cleared
    }

    /// Last `n` entries, oldest to newest.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[InteractionSlot] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Session identifier for this log.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Engagement thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> EngagementThresholds {
        self.thresholds
    }
}
