use storage::error::StorageError;
use storage::models::{ContestType, VoteState};
use thiserror::Error;
use uuid::Uuid;

/// Failures of engine operations.
///
/// Everything except [`VoteError::Storage`] is an expected outcome that
/// leaves engine state untouched and should be reported to the caller.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("{0} voting is not open")]
    NotOpen(ContestType),

    #[error("User has already voted in this contest")]
    AlreadyVoted,

    #[error("User is not eligible to vote in this contest")]
    NotEligible,

    #[error("Score {value} for question {question_id} is outside {min}..={max}")]
    OutOfRange {
        question_id: Uuid,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Cannot move {contest_type} voting from {from} to {to}")]
    InvalidTransition {
        contest_type: ContestType,
        from: VoteState,
        to: VoteState,
    },

    #[error("Specialty contest is not active")]
    InactiveContest,

    #[error("User is not allowed to submit these scores")]
    NotAuthorized,

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, VoteError>;

impl VoteError {
    /// Stable machine-readable code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotOpen(_) => "not_open",
            Self::AlreadyVoted => "already_voted",
            Self::NotEligible => "not_eligible",
            Self::OutOfRange { .. } => "out_of_range",
            Self::NotFound(_) => "not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::InactiveContest => "inactive_contest",
            Self::NotAuthorized => "not_authorized",
            Self::InvalidSubmission(_) => "invalid_submission",
            Self::Storage(_) => "storage_error",
        }
    }
}
