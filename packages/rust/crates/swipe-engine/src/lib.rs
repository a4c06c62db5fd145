//! swipe-engine - Swipe curation engine
//!
//! Turns a pointer gesture stream into committed decisions over a stack of
//! candidate items.
//!
//! # Architecture
//!
//! ```text
//! GestureSample (dx, dy, vx, vy, phase)
//!      ↓
//! SwipeSession ── map_feedback() → FeedbackIntensity (per frame)
//!      ↓ release
//! classify() → Pending | Cancel | Commit(Intent)
//!      ↓ commit
//! CardStack ── TrackerHandle.record_decision()
//!      │    ── DecisionSink.on_commit()   (fire and forget)
//!      │    ── EventBus: decision/committed, stack/empty
//!      ↓
//! next front item becomes interactive
//! ```
//!
//! Classification and feedback are pure functions of their inputs. The stack
//! is single-threaded (one user, one session); the tracker handle is the only
//! piece meant to be shared across threads.

mod classifier;
pub mod config;
mod feedback;
mod session;
mod sink;
mod stack;

pub use classifier::{Axis, ClassifierConfig, classify, commit_confidence, dominant_axis, intent_for};
pub use config::{CurationSettings, EngineConfig, load_curation_settings, set_config_home_override};
pub use feedback::{FeedbackConfig, FeedbackIntensity, map_feedback};
pub use session::{SampleOutcome, SwipeSession};
pub use sink::{
    ChannelDecisionSink, DecisionSink, EventBusDecisionSink, NoopDecisionSink, PersistRequest,
};
pub use stack::{CardStack, CommitOutcome, StackConfig, StackPhase, StackState};
