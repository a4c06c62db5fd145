//! Decision sink: fire-and-forget hand-off of committed decisions.

use anyhow::{Context, Result, anyhow};
use swipe_events::{CurationEvent, EventBus};
use swipe_types::{Decision, Item, SwipeRecord};
use tokio::sync::mpsc;

/// Receives committed decisions for persistence.
///
/// Implementations must return promptly: the card stack calls this on the
/// gesture-end path. Retry and backoff belong to the collaborator behind it.
pub trait DecisionSink: Send + Sync {
    /// Sink identifier for logs.
    fn sink_name(&self) -> &'static str;

    /// Hand one decision off. Errors are logged by the caller, never retried.
    fn on_commit(&self, decision: &Decision, item: &Item) -> Result<()>;
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDecisionSink;

impl DecisionSink for NoopDecisionSink {
    fn sink_name(&self) -> &'static str {
        "noop"
    }

    fn on_commit(&self, _decision: &Decision, _item: &Item) -> Result<()> {
        Ok(())
    }
}

/// One queued persistence request.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistRequest {
    /// Committed decision.
    pub decision: Decision,
    /// Item it was made on.
    pub item: Item,
}

impl PersistRequest {
    /// Persistence payload for this request.
    #[must_use]
    pub fn record(&self) -> SwipeRecord {
        SwipeRecord::from_decision(&self.decision)
    }
}

/// Hands decisions to a persistence task over an unbounded channel.
///
/// `send` on an unbounded channel never blocks, which keeps the gesture path
/// free of persistence latency.
#[derive(Debug, Clone)]
pub struct ChannelDecisionSink {
    tx: mpsc::UnboundedSender<PersistRequest>,
}

impl ChannelDecisionSink {
    /// Create the sink and the receiver the persistence task drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PersistRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DecisionSink for ChannelDecisionSink {
    fn sink_name(&self) -> &'static str {
        "channel"
    }

    fn on_commit(&self, decision: &Decision, item: &Item) -> Result<()> {
        self.tx
            .send(PersistRequest {
                decision: decision.clone(),
                item: item.clone(),
            })
            .map_err(|_| anyhow!("persistence receiver dropped"))
    }
}

/// Publishes the swipe record on the event bus under `decision/persist`.
#[derive(Debug, Clone)]
pub struct EventBusDecisionSink {
    bus: EventBus,
}

impl EventBusDecisionSink {
    /// Sink publishing on `bus`.
    #[must_use]
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl DecisionSink for EventBusDecisionSink {
    fn sink_name(&self) -> &'static str {
        "event_bus"
    }

    fn on_commit(&self, decision: &Decision, item: &Item) -> Result<()> {
        let record = serde_json::to_value(SwipeRecord::from_decision(decision))
            .context("failed to encode swipe record")?;
        self.bus.publish(CurationEvent::decision_persist(item, record));
        Ok(())
    }
}
