//! Gesture session: routes the pointer stream into the classifier, the
//! feedback mapper and, on release, the card stack.

use std::sync::Arc;
use std::time::Instant;

use swipe_events::EventBus;
use swipe_session::TrackerHandle;
use swipe_types::{
    Classification, Decision, GestureMetrics, GestureSample, Item,
};

use crate::classifier::{ClassifierConfig, classify, commit_confidence};
use crate::config::EngineConfig;
use crate::feedback::{FeedbackConfig, FeedbackIntensity, map_feedback};
use crate::sink::DecisionSink;
use crate::stack::{CardStack, CommitOutcome, StackPhase};

/// What one sample did.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// No item to gesture on; nothing happened.
    NoActiveItem,
    /// Gesture in progress on `item_id`.
    Tracking {
        /// Item under the finger.
        item_id: String,
        /// Overlay intensities for this frame.
        feedback: FeedbackIntensity,
    },
    /// Released past a threshold; the decision was committed.
    Committed {
        /// Recorded decision.
        decision: Decision,
        /// Whether the stack ran dry with this commit.
        exhausted: bool,
    },
    /// Released past a threshold, but the item was no longer at the front.
    Stale {
        /// Item the gesture started on.
        item_id: String,
    },
    /// Released short, cancelled by the platform, or malformed: the card
    /// snaps back and nothing is recorded.
    SnappedBack {
        /// Item the gesture started on.
        item_id: String,
    },
}

#[derive(Debug)]
struct ActiveGesture {
    item_id: String,
    started: Instant,
    samples: u32,
    peak_speed: f64,
}

impl ActiveGesture {
    fn start(item_id: String) -> Self {
        Self {
            item_id,
            started: Instant::now(),
            samples: 0,
            peak_speed: 0.0,
        }
    }

    fn observe(&mut self, sample: &GestureSample) {
        self.samples = self.samples.saturating_add(1);
        if sample.is_finite() {
            self.peak_speed = self.peak_speed.max(sample.speed());
        }
    }

    fn finish(&self, confidence: f64) -> GestureMetrics {
        GestureMetrics {
            duration_ms: u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
            sample_count: self.samples,
            peak_speed: self.peak_speed,
            confidence,
        }
    }
}

/// One user's swipe session over a card stack.
#[derive(Debug)]
pub struct SwipeSession {
    stack: CardStack,
    classifier: ClassifierConfig,
    feedback: FeedbackConfig,
    gesture: Option<ActiveGesture>,
}

impl SwipeSession {
    /// Build a session from resolved configuration.
    #[must_use]
    pub fn new(
        config: &EngineConfig,
        tracker: TrackerHandle,
        sink: Arc<dyn DecisionSink>,
        bus: EventBus,
    ) -> Self {
        Self::from_stack(
            CardStack::new(config.stack, tracker, sink, bus),
            config.classifier,
            config.feedback,
        )
    }

    /// Build a session that owns its tracker and bus, both sized from
    /// `config` (engagement thresholds, bus capacity).
    #[must_use]
    pub fn from_config(
        config: &EngineConfig,
        session_id: &str,
        sink: Arc<dyn DecisionSink>,
    ) -> Self {
        Self::new(
            config,
            TrackerHandle::with_thresholds(session_id, config.engagement),
            sink,
            EventBus::new(config.bus_capacity),
        )
    }

    /// Bus the stack publishes on; subscribe here for stack notifications.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        self.stack.bus()
    }

    /// Wrap an existing stack.
    #[must_use]
    pub fn from_stack(
        stack: CardStack,
        classifier: ClassifierConfig,
        feedback: FeedbackConfig,
    ) -> Self {
        Self {
            stack,
            classifier,
            feedback,
            gesture: None,
        }
    }

    /// Feed one pointer sample.
    ///
    /// The first sample of a gesture binds it to the current front item; a
    /// release commits that item, so a late release after the front moved
    /// resolves as stale rather than deciding the wrong card.
    pub fn handle_sample(&mut self, sample: GestureSample) -> SampleOutcome {
        if self.gesture.is_none() {
            let Some(front) = self.stack.active_item() else {
                return SampleOutcome::NoActiveItem;
            };
            self.gesture = Some(ActiveGesture::start(front.id.clone()));
        }
        let Some(gesture) = self.gesture.as_mut() else {
            return SampleOutcome::NoActiveItem;
        };
        gesture.observe(&sample);

        match classify(&sample, &self.classifier) {
            Classification::Pending => SampleOutcome::Tracking {
                item_id: gesture.item_id.clone(),
                feedback: map_feedback(sample.dx, sample.dy, &self.feedback),
            },
            Classification::Cancel => {
                let item_id = gesture.item_id.clone();
                self.gesture = None;
                tracing::trace!(item_id = %item_id, "gesture snapped back");
                SampleOutcome::SnappedBack { item_id }
            }
            Classification::Commit(intent) => {
                let confidence = commit_confidence(&sample, &self.classifier).unwrap_or(1.0);
                let metrics = gesture.finish(confidence);
                let item_id = gesture.item_id.clone();
                self.gesture = None;
                match self
                    .stack
                    .commit_with_metrics(&item_id, intent, Some(metrics))
                {
                    CommitOutcome::Committed {
                        decision,
                        exhausted,
                    } => SampleOutcome::Committed {
                        decision,
                        exhausted,
                    },
                    CommitOutcome::Stale { .. } | CommitOutcome::NoActiveItem => {
                        SampleOutcome::Stale { item_id }
                    }
                }
            }
        }
    }

    /// Overlay intensities for an offset, without touching gesture state.
    #[must_use]
    pub fn feedback_for(&self, dx: f64, dy: f64) -> FeedbackIntensity {
        map_feedback(dx, dy, &self.feedback)
    }

    /// Drop any in-flight gesture without recording anything.
    pub fn abandon_gesture(&mut self) {
        self.gesture = None;
    }

    /// Item the in-flight gesture is bound to.
    #[must_use]
    pub fn gesture_item(&self) -> Option<&str> {
        self.gesture.as_ref().map(|g| g.item_id.as_str())
    }

    /// Replenish the queue; never interrupts an in-flight gesture.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = Item>) -> usize {
        self.stack.append_items(items)
    }

    /// See [`CardStack::reset_session`]. Also drops any in-flight gesture.
    pub fn reset_session(&mut self) -> usize {
        self.gesture = None;
        self.stack.reset_session()
    }

    /// Controller state.
    #[must_use]
    pub fn phase(&self) -> StackPhase {
        self.stack.phase()
    }

    /// Shared tracker handle for predicate consumers.
    #[must_use]
    pub fn tracker(&self) -> &TrackerHandle {
        self.stack.tracker()
    }

    /// Underlying stack.
    #[must_use]
    pub fn stack(&self) -> &CardStack {
        &self.stack
    }

    /// Underlying stack, mutably (for direct commits from non-gesture input).
    pub fn stack_mut(&mut self) -> &mut CardStack {
        &mut self.stack
    }

    /// Classifier thresholds in use.
    #[must_use]
    pub fn classifier_config(&self) -> &ClassifierConfig {
        &self.classifier
    }
}
