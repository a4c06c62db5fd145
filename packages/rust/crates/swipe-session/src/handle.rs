//! Shared handle for external predicate consumers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use swipe_types::{Decision, Intent};

use crate::{EngagementThresholds, InteractionTracker, SessionStats};

/// Cloneable handle to one session's tracker.
///
/// The card stack writes through it on commit; any UI surface may hold a
/// clone and read stats or predicates synchronously.
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    inner: Arc<RwLock<InteractionTracker>>,
}

impl TrackerHandle {
    /// Handle over a fresh tracker.
    #[must_use]
    pub fn new(session_id: &str) -> Self {
        Self::from_tracker(InteractionTracker::new(session_id))
    }

    /// Handle over a fresh tracker with explicit thresholds.
    #[must_use]
    pub fn with_thresholds(session_id: &str, thresholds: EngagementThresholds) -> Self {
        Self::from_tracker(InteractionTracker::with_thresholds(session_id, thresholds))
    }

    /// Wrap an existing tracker.
    #[must_use]
    pub fn from_tracker(tracker: InteractionTracker) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tracker)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, InteractionTracker> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InteractionTracker> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`InteractionTracker::record`].
    pub fn record(&self, intent: Intent) {
        self.write().record(intent);
    }

    /// See [`InteractionTracker::record_decision`].
    pub fn record_decision(&self, decision: &Decision) {
        self.write().record_decision(decision);
    }

    /// See [`InteractionTracker::get_stats`].
    #[must_use]
    pub fn get_stats(&self) -> SessionStats {
        self.read().get_stats()
    }

    /// See [`InteractionTracker::has_performed_calendar_action`].
    #[must_use]
    pub fn has_performed_calendar_action(&self) -> bool {
        self.read().has_performed_calendar_action()
    }

    /// See [`InteractionTracker::has_performed_any_action`].
    #[must_use]
    pub fn has_performed_any_action(&self) -> bool {
        self.read().has_performed_any_action()
    }

    /// See [`InteractionTracker::reset`].
    pub fn reset(&self) -> usize {
        self.write().reset()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Owned copy of the session id.
    #[must_use]
    pub fn session_id(&self) -> String {
        self.read().session_id().to_string()
    }

    /// Run a read-only closure against the tracker.
    pub fn with_tracker<R>(&self, f: impl FnOnce(&InteractionTracker) -> R) -> R {
        f(&self.read())
    }
}
