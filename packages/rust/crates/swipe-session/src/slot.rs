//! Single entry in the interaction log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swipe_types::{Decision, Intent};

/// One committed intent, optionally tied to the item it was made on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct InteractionSlot {
    /// Item the intent was committed on, when known.
    pub item_id: Option<String>,
    /// Committed intent.
    pub intent: Intent,
    /// Local timestamp of the record.
    pub recorded_at: DateTime<Utc>,
}

impl InteractionSlot {
    /// Slot without an item reference, stamped now.
    pub fn new(intent: Intent) -> Self {
        Self {
            item_id: None,
            intent,
            recorded_at: Utc::now(),
        }
    }

    /// Attach the item this intent was made on.
    pub fn with_item(mut self, item_id: String) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// Slot mirroring a committed decision (keeps its commit time).
    pub fn from_decision(decision: &Decision) -> Self {
        Self {
            item_id: None,
            intent: decision.intent,
            recorded_at: decision.committed_at,
        }
        .with_item(decision.item_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_slot_carries_item() {
        let decision = Decision::new("evt-3", Intent::Dismiss);
        let slot = InteractionSlot::from_decision(&decision);
        assert_eq!(slot, InteractionSlot {
            item_id: Some("evt-3".to_string()),
            intent: Intent::Dismiss,
            recorded_at: decision.committed_at,
        });
        assert_eq!(InteractionSlot::new(Intent::SaveLater).item_id, None);
    }
}
