//! swipe-session: session interaction tracker.
//!
//! Append-only log of the intents the user committed in the running session,
//! with aggregate statistics recomputed on read and the boolean predicates
//! other UI surfaces gate on (e.g. revealing the calendar filter toggle).
//! Python can use this via `PyO3` when feature "pybindings" is enabled.

mod handle;
mod slot;
mod stats;
mod tracker;

pub use handle::TrackerHandle;
pub use slot::InteractionSlot;
pub use stats::{EngagementLevel, EngagementThresholds, IntentCounts, SessionStats};
pub use tracker::InteractionTracker;

#[cfg(feature = "pybindings")]
mod pymodule_impl;

#[cfg(feature = "pybindings")]
pub use pymodule_impl::PyInteractionTracker;
