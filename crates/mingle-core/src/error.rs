use thiserror::Error;

/// Failure modes of schedule construction and solving. Everything here is a
/// caller-contract or environment problem; hot-path invariants are carried
/// as debug assertions instead.
#[derive(Error, Debug)]
pub enum MingleError {
    /// Roster dimensions that cannot seat anyone.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// Annealing parameters outside their domain.
    #[error("invalid annealing parameters: {0}")]
    InvalidParams(String),

    /// A malformed per-group count list.
    #[error("--{option}: {problem}")]
    BadCountList {
        option: &'static str,
        problem: String,
    },

    /// An operation that needs an initialized schedule ran first.
    #[error("schedule is not initialized")]
    Uninitialized,

    /// Immovable counts whose length does not match the group count.
    #[error("immovable counts for {got} groups, schedule has {have}")]
    ImmovableCountMismatch { got: usize, have: usize },

    /// An immovable count larger than the group's slot count.
    #[error("immovable count {count} does not fit {per_group} slots per group")]
    ImmovableOutOfRange { count: usize, per_group: usize },

    /// The verifier found the seating and its incremental bookkeeping out
    /// of step. A bug in the engine, never a user error.
    #[error("schedule failed verification: {}", .problems.join("; "))]
    BrokenInvariants { problems: Vec<String> },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type MingleResult<T> = Result<T, MingleError>;
