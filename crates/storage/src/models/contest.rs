use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StorageError;

/// The two independently gated contests of a show.
///
/// Also used as the result type of published snapshots: judge results are
/// scoped by vehicle class, specialty results by specialty contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContestType {
    Judge,
    Specialty,
}

impl ContestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Judge => "judge",
            Self::Specialty => "specialty",
        }
    }
}

impl fmt::Display for ContestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "judge" => Ok(Self::Judge),
            "specialty" => Ok(Self::Specialty),
            other => Err(StorageError::Decode(format!("unknown contest type '{other}'"))),
        }
    }
}

/// Voting state of a contest. Only `Open` accepts ledger writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    #[default]
    Closed,
    Open,
    Locked,
}

impl VoteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Locked => "locked",
        }
    }

    /// Admin-initiated transitions. Re-entering the current state is not a
    /// transition.
    pub fn can_transition_to(&self, next: VoteState) -> bool {
        matches!(
            (self, next),
            (Self::Closed, Self::Open)
                | (Self::Open, Self::Closed)
                | (Self::Open, Self::Locked)
                | (Self::Locked, Self::Open)
        )
    }

    pub fn accepts_writes(&self) -> bool {
        *self == Self::Open
    }
}

impl fmt::Display for VoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteState {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(Self::Closed),
            "open" => Ok(Self::Open),
            "locked" => Ok(Self::Locked),
            other => Err(StorageError::Decode(format!("unknown vote state '{other}'"))),
        }
    }
}
