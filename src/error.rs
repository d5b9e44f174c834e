//! Error types for plan parsing, exercise stores and plan storage

use thiserror::Error;

/// Why a plan could not be parsed or converted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Nothing but blank lines and comments
    #[error("plan is empty")]
    EmptyInput,

    /// `Day <n>:` header with nothing after the colon
    #[error("line {line}: day header has no name")]
    MalformedDay { line: usize },

    #[error("line {line}: malformed exercise ({reason})")]
    MalformedExercise { line: usize, reason: String },

    /// First content line is neither `Plan Name:` nor a day header
    #[error("line {line}: expected `Plan Name:` or a `Day <n>:` header")]
    MissingLeadingPlanName { line: usize },

    #[error("plan contains no days")]
    NoDaysProduced,

    /// The exercise store failed while resolving an exercise
    #[error("failed to process plan: {0}")]
    StoreFailure(String),

    #[error("malformed JSON plan: {0}")]
    JsonMalformed(String),

    /// Required exercise field absent. `day` and `exercise` are 1-based.
    #[error("day {day}, exercise {exercise}: missing field `{field}`")]
    JsonMissingField {
        day: usize,
        exercise: usize,
        field: &'static str,
    },
}

impl From<StoreError> for PlanError {
    fn from(e: StoreError) -> Self {
        Self::StoreFailure(e.to_string())
    }
}

/// Exercise store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

/// Plan storage failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("plan `{0}` already exists")]
    Duplicate(String),

    #[error("no plan matching `{0}`")]
    NotFound(String),

    /// A stored row no longer maps onto the model
    #[error("stored plan is corrupt: {0}")]
    Corrupt(String),
}
