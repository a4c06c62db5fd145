//! Notification bus for the swipe curation engine
//!
//! Provides a pub/sub event system backed by tokio's broadcast channel.
//! Used to decouple the card stack from the surfaces that react to it:
//! Stack -> "reload / switch filter" prompt, Stack -> persistence, Tracker -> UI.
//!
//! # Architecture
//!
//! ```text
//! CurationEvent (source, topic, payload)
//!      ↓
//! EventBus.publish() → broadcast::Sender
//!      ↓
//! Fan-out to multiple Subscribers
//!      ↓
//! Each surface receives events asynchronously
//! ```
//!
//! Publishing never blocks and never fails: with no subscribers the event is
//! dropped, and slow subscribers observe `RecvError::Lagged` instead of
//! stalling the gesture loop.

pub mod topics;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use swipe_types::{Decision, Intent, Item};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default bus capacity.
pub const DEFAULT_BUS_CAPACITY: usize = 256;

/// Core event model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationEvent {
    /// Unique event identifier
    pub id: String,
    /// Event source (e.g., "card_stack", "session_tracker")
    pub source: String,
    /// Event topic/category (e.g., "stack/empty")
    pub topic: String,
    /// Flexible JSON payload
    pub payload: Value,
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
}

impl CurationEvent {
    /// Create a new event
    pub fn new(source: impl Into<String>, topic: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            topic: topic.into(),
            payload,
            timestamp: Utc::now(),
        }
    }

    /// A decision was committed for `decision.item_id`.
    #[must_use]
    pub fn decision_committed(decision: &Decision, remaining: usize) -> Self {
        Self::new(
            sources::CARD_STACK,
            topics::DECISION_COMMITTED,
            json!({
                "item_id": decision.item_id,
                "intent": decision.intent,
                "committed_at": decision.committed_at,
                "remaining": remaining,
            }),
        )
    }

    /// The queue became empty after a commit.
    #[must_use]
    pub fn stack_empty(exhaustion: u64, last_item_id: &str) -> Self {
        Self::new(
            sources::CARD_STACK,
            topics::STACK_EMPTY,
            json!({ "exhaustion": exhaustion, "last_item_id": last_item_id }),
        )
    }

    /// Items were accepted into the queue.
    #[must_use]
    pub fn stack_replenished(accepted: usize, queued: usize, reactivated: bool) -> Self {
        Self::new(
            sources::CARD_STACK,
            topics::STACK_REPLENISHED,
            json!({ "accepted": accepted, "queued": queued, "reactivated": reactivated }),
        )
    }

    /// A commit attempt was ignored.
    #[must_use]
    pub fn commit_rejected(item_id: &str, intent: Intent, reason: &str) -> Self {
        Self::new(
            sources::CARD_STACK,
            topics::COMMIT_REJECTED,
            json!({ "item_id": item_id, "intent": intent, "reason": reason }),
        )
    }

    /// Persistence hand-off for a committed item.
    #[must_use]
    pub fn decision_persist(item: &Item, record: Value) -> Self {
        Self::new(
            sources::DECISION_SINK,
            topics::DECISION_PERSIST,
            json!({ "item": item, "record": record }),
        )
    }

    /// The interaction log for `session_id` was cleared.
    #[must_use]
    pub fn session_reset(session_id: &str, cleared: usize) -> Self {
        Self::new(
            sources::SESSION_TRACKER,
            topics::SESSION_RESET,
            json!({ "session_id": session_id, "cleared": cleared }),
        )
    }
}

impl std::fmt::Display for CurationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} -> {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.source,
            self.topic,
            self.payload
        )
    }
}

/// Non-blocking async event bus
///
/// Uses `tokio::sync::broadcast` channel for:
/// - Thread-safe 1-to-Many fan-out
/// - Non-blocking publish
/// - Automatic cleanup on receiver drop
#[derive(Clone)]
pub struct EventBus {
    /// Broadcast sender (clonable for multiple publishers)
    tx: broadcast::Sender<CurationEvent>,
    /// Bus capacity for backpressure handling
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}

impl EventBus {
    /// Create a new event bus with specified capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Get the bus capacity
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of subscribers who received the event.
    /// Returns 0 if there are no subscribers (not an error).
    pub fn publish(&self, event: CurationEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to the event bus
    ///
    /// Returns a receiver that will receive all future events.
    /// Dropping the receiver automatically unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CurationEvent> {
        self.tx.subscribe()
    }

    /// Get current subscriber count
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Event source constants
pub mod sources {
    /// Card stack controller
    pub const CARD_STACK: &str = "card_stack";
    /// Session interaction tracker
    pub const SESSION_TRACKER: &str = "session_tracker";
    /// Persistence hand-off
    pub const DECISION_SINK: &str = "decision_sink";
}
