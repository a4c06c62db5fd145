//! Event topic constants for type-safe routing.

/// A decision was committed and the stack advanced
pub const DECISION_COMMITTED: &str = "decision/committed";
/// A decision was handed to the persistence sink
pub const DECISION_PERSIST: &str = "decision/persist";
/// A commit attempt was ignored (stale or no active item)
pub const COMMIT_REJECTED: &str = "commit/rejected";

/// The queue ran dry
pub const STACK_EMPTY: &str = "stack/empty";
/// New items were accepted into the queue
pub const STACK_REPLENISHED: &str = "stack/replenished";

/// The interaction log was cleared
pub const SESSION_RESET: &str = "session/reset";

/// All topics as a const array for iteration
pub const ALL_TOPICS: &[(&str, &str)] = &[
    ("DECISION_COMMITTED", DECISION_COMMITTED),
    ("DECISION_PERSIST", DECISION_PERSIST),
    ("COMMIT_REJECTED", COMMIT_REJECTED),
    ("STACK_EMPTY", STACK_EMPTY),
    ("STACK_REPLENISHED", STACK_REPLENISHED),
    ("SESSION_RESET", SESSION_RESET),
];

/// Stack lifecycle topics.
pub mod stack {
    use super::*;

    /// Topics a "switch filter / reload" surface listens to.
    pub const TOPICS: &[(&str, &str)] = &[
        ("EMPTY", STACK_EMPTY),
        ("REPLENISHED", STACK_REPLENISHED),
    ];
}

/// Decision lifecycle topics.
pub mod decision {
    use super::*;

    /// Commit outcome topics.
    pub const TOPICS: &[(&str, &str)] = &[
        ("COMMITTED", DECISION_COMMITTED),
        ("PERSIST", DECISION_PERSIST),
        ("REJECTED", COMMIT_REJECTED),
    ];
}
