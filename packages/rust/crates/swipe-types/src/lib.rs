//! swipe-types - Common type definitions for the swipe curation engine
//!
//! This crate provides the data model shared by the classifier, the card
//! stack, the session tracker and the persistence collaborators.
//!
//! # Schema Singularity
//! Types derive `schemars::JsonSchema` so the persistence and UI layers can
//! retrieve authoritative schemas for decisions and swipe records instead of
//! re-declaring them.

#![allow(clippy::doc_markdown)]

mod decision;
mod gesture;
mod intent;
mod item;
mod record;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use decision::{Decision, GestureMetrics};
pub use gesture::{Classification, GesturePhase, GestureSample};
pub use intent::{CalendarType, Intent, SwipeAction, SwipeDirection, VisibilityLevel};
pub use item::Item;
pub use record::{MAX_INVITED_FRIENDS, MAX_NOTES_CHARS, SwipeRecord};

/// Result type with curation-specific error
pub type CurationResult<T> = Result<T, CurationError>;

/// Unified error type for configuration and persistence-payload failures.
///
/// Interaction-path conditions (stale commits, empty stacks) are outcomes,
/// not errors, and never surface here.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum CurationError {
    /// Threshold or window configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// Persistence payload failed validation
    #[error("Invalid swipe record: {0}")]
    InvalidRecord(String),

    /// Wire value did not match any known variant
    #[error("Unknown value: {0}")]
    Unknown(String),
}
