//! Card stack controller.
//!
//! Owns the pending queue, the interactive front item and the look-ahead
//! window. Commits remove the front item, so the active index is always 0
//! and the window is a pure prefix view over the queue.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use swipe_events::{CurationEvent, EventBus};
use swipe_session::TrackerHandle;
use swipe_types::{CurationError, CurationResult, Decision, GestureMetrics, Intent, Item};

use crate::sink::DecisionSink;

/// Stack sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Items kept pre-rendered from the front of the queue.
    pub visible_window: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self { visible_window: 3 }
    }
}

impl StackConfig {
    /// # Errors
    /// Returns [`CurationError::Config`] for a zero window.
    pub fn validate(self) -> CurationResult<Self> {
        if self.visible_window == 0 {
            return Err(CurationError::Config(
                "stack.visible_window must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackPhase {
    /// Nothing was ever supplied.
    Idle,
    /// A front item is available for gestures.
    Active,
    /// The queue was emptied by commits; waits for replenishment.
    Exhausted,
}

/// Comparable snapshot of the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackState {
    /// Ids of queued items, front first.
    pub queue: Vec<String>,
    /// Index of the interactive item within `queue`.
    pub active_index: usize,
    /// Look-ahead size.
    pub visible_window: usize,
}

/// Result of a commit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The front item was committed and removed.
    Committed {
        /// Recorded decision.
        decision: Decision,
        /// Whether this commit emptied the queue.
        exhausted: bool,
    },
    /// The item is not at the front (already committed, or never queued).
    Stale {
        /// Item the commit was attempted on.
        item_id: String,
        /// Current front, if any.
        front: Option<String>,
    },
    /// There is no front item.
    NoActiveItem,
}

impl CommitOutcome {
    /// The decision, when the commit went through.
    #[must_use]
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Self::Committed { decision, .. } => Some(decision),
            Self::Stale { .. } | Self::NoActiveItem => None,
        }
    }
}

/// Card stack controller.
pub struct CardStack {
    queue: VecDeque<Item>,
    queued: HashSet<String>,
    visible_window: usize,
    decided: HashSet<String>,
    phase: StackPhase,
    exhaustions: u64,
    tracker: TrackerHandle,
    sink: Arc<dyn DecisionSink>,
    bus: EventBus,
}

impl std::fmt::Debug for CardStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStack")
            .field("queued", &self.queue.len())
            .field("visible_window", &self.visible_window)
            .field("decided", &self.decided.len())
            .field("phase", &self.phase)
            .field("exhaustions", &self.exhaustions)
            .field("sink", &self.sink.sink_name())
            .finish_non_exhaustive()
    }
}

impl CardStack {
    /// Create an empty (`Idle`) stack.
    ///
    /// A zero window is raised to 1.
    #[must_use]
    pub fn new(
        config: StackConfig,
        tracker: TrackerHandle,
        sink: Arc<dyn DecisionSink>,
        bus: EventBus,
    ) -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visible_window: config.visible_window.max(1),
            decided: HashSet::new(),
            phase: StackPhase::Idle,
            exhaustions: 0,
            tracker,
            sink,
            bus,
        }
    }

    /// Current controller state.
    #[must_use]
    pub fn phase(&self) -> StackPhase {
        self.phase
    }

    /// Item currently available for gestures.
    #[must_use]
    pub fn active_item(&self) -> Option<&Item> {
        self.queue.front()
    }

    /// Pre-rendered prefix: up to `visible_window` items from the front.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&Item> {
        self.queue.iter().take(self.visible_window).collect()
    }

    /// How many items the catalogue should add to fill the look-ahead window.
    #[must_use]
    pub fn lookahead_shortfall(&self) -> usize {
        self.visible_window.saturating_sub(self.queue.len())
    }

    /// Look-ahead size.
    #[must_use]
    pub fn visible_window(&self) -> usize {
        self.visible_window
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// How many times the queue has run dry.
    #[must_use]
    pub fn exhaustions(&self) -> u64 {
        self.exhaustions
    }

    /// Whether `item_id` already received a decision this session.
    #[must_use]
    pub fn is_decided(&self, item_id: &str) -> bool {
        self.decided.contains(item_id)
    }

    /// Tracker this stack records into.
    #[must_use]
    pub fn tracker(&self) -> &TrackerHandle {
        &self.tracker
    }

    /// Bus this stack publishes on.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Comparable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StackState {
        StackState {
            queue: self.queue.iter().map(|item| item.id.clone()).collect(),
            active_index: 0,
            visible_window: self.visible_window,
        }
    }

    /// Append items from the catalogue. Accepted in every state.
    ///
    /// Items already queued or already decided this session are skipped so
    /// the look-ahead window never shows a decided item. Returns the number
    /// of items accepted.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = Item>) -> usize {
        let mut accepted = 0;
        for item in items {
            if self.decided.contains(&item.id) || !self.queued.insert(item.id.clone()) {
                tracing::debug!(item_id = %item.id, "skipping duplicate or decided item");
                continue;
            }
            self.queue.push_back(item);
            accepted += 1;
        }

        let reactivated = accepted > 0 && self.phase != StackPhase::Active;
        if reactivated {
            self.phase = StackPhase::Active;
        }
        if accepted > 0 {
            tracing::debug!(accepted, queued = self.queue.len(), reactivated, "stack replenished");
            self.bus.publish(CurationEvent::stack_replenished(
                accepted,
                self.queue.len(),
                reactivated,
            ));
        }
        accepted
    }

    /// Commit `intent` on `item_id`, which must be the front item.
    pub fn commit(&mut self, item_id: &str, intent: Intent) -> CommitOutcome {
        self.commit_with_metrics(item_id, intent, None)
    }

    /// Commit with gesture measurements attached to the decision.
    ///
    /// Anything other than the front item is rejected as stale without side
    /// effects on the queue or the tracker. The sink is notified after the
    /// queue has advanced; a sink failure is logged and does not roll back.
    pub fn commit_with_metrics(
        &mut self,
        item_id: &str,
        intent: Intent,
        metrics: Option<GestureMetrics>,
    ) -> CommitOutcome {
        let front_matches = match self.queue.front() {
            None => {
                tracing::debug!(item_id, %intent, phase = ?self.phase, "commit with no active item ignored");
                self.bus.publish(CurationEvent::commit_rejected(
                    item_id,
                    intent,
                    "no_active_item",
                ));
                return CommitOutcome::NoActiveItem;
            }
            Some(front) => front.id == item_id,
        };
        if !front_matches {
            let front = self.queue.front().map(|item| item.id.clone());
            tracing::debug!(item_id, %intent, front = ?front, "stale commit ignored");
            self.bus
                .publish(CurationEvent::commit_rejected(item_id, intent, "stale"));
            return CommitOutcome::Stale {
                item_id: item_id.to_string(),
                front,
            };
        }

        let Some(item) = self.queue.pop_front() else {
            return CommitOutcome::NoActiveItem;
        };
        let mut decision = Decision::new(item.id.clone(), intent);
        if let Some(metrics) = metrics {
            decision = decision.with_metrics(metrics);
        }
        self.queued.remove(&item.id);
        self.decided.insert(item.id.clone());
        self.tracker.record_decision(&decision);

        if let Err(error) = self.sink.on_commit(&decision, &item) {
            tracing::warn!(
                sink = self.sink.sink_name(),
                item_id = %item.id,
                error = %error,
                "decision sink failed; queue already advanced"
            );
        }

        self.bus
            .publish(CurationEvent::decision_committed(&decision, self.queue.len()));
        tracing::debug!(item_id = %item.id, %intent, remaining = self.queue.len(), "decision committed");

        let exhausted = self.queue.is_empty();
        if exhausted {
            self.phase = StackPhase::Exhausted;
            self.exhaustions += 1;
            tracing::info!(exhaustion = self.exhaustions, "card stack exhausted");
            self.bus
                .publish(CurationEvent::stack_empty(self.exhaustions, &item.id));
        }

        CommitOutcome::Committed {
            decision,
            exhausted,
        }
    }

    /// Start a new session: clear the tracker and the decided-item memory.
    /// The queue is left as is. Returns the number of log entries cleared.
    pub fn reset_session(&mut self) -> usize {
        let cleared = self.tracker.reset();
        self.decided.clear();
        let session_id = self.tracker.session_id();
        self.bus
            .publish(CurationEvent::session_reset(&session_id, cleared));
        cleared
    }
}
