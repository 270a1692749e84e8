//! Error taxonomy for bracket generation, registration and progression.

use crate::models::{BracketType, MatchId, MatchKey, TeamId, TournamentId};
use thiserror::Error;

/// Broad category of a [`TournamentError`], used by callers to pick a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input shape; the caller's fault.
    Validation,
    /// The tournament or match is not in a state that allows the action.
    Precondition,
    NotFound,
    /// The action would overwrite or duplicate existing state.
    Conflict,
    /// Unsupported bracket type or size. Not recoverable by retrying.
    Configuration,
    Internal,
}

/// Errors that can occur during tournament operations.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Need at least 2 teams to seed a bracket (got {got})")]
    InsufficientTeams { got: usize },

    #[error("Need at least 2 teams to generate bracket (registered {registered})")]
    TooFewParticipants { registered: usize },

    #[error("Tournament bracket already generated")]
    AlreadyStarted,

    #[error("Results have already been reported; the bracket can no longer be regenerated")]
    ResultsAlreadyReported,

    #[error("Tournament is full (capacity {capacity})")]
    TournamentFull { capacity: usize },

    #[error("Match {0} is still waiting for an opponent")]
    MatchNotReady(MatchId),

    #[error("Match {0} is already completed")]
    AlreadyCompleted(MatchId),

    #[error("Team {team} is not playing in match {match_id}")]
    InvalidWinner { match_id: MatchId, team: TeamId },

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("No match at {0}")]
    MatchKeyNotFound(MatchKey),

    #[error("Team {0} is already registered")]
    AlreadyRegistered(TeamId),

    #[error("Slot {key} team_{position} is already filled")]
    SlotOccupied { key: MatchKey, position: u8 },

    #[error("A match already exists at {0}")]
    DuplicateMatch(MatchKey),

    #[error("Unsupported bracket type: {0}")]
    UnsupportedBracketType(String),

    #[error("{bracket_type} does not support {teams} teams")]
    UnsupportedBracketSize {
        bracket_type: BracketType,
        teams: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal lock poisoned")]
    LockPoisoned,
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            Validation(_) | Csv(_) => ErrorKind::Validation,
            InsufficientTeams { .. }
            | TooFewParticipants { .. }
            | AlreadyStarted
            | ResultsAlreadyReported
            | TournamentFull { .. }
            | MatchNotReady(_)
            | AlreadyCompleted(_)
            | InvalidWinner { .. } => ErrorKind::Precondition,
            TournamentNotFound(_) | MatchNotFound(_) | MatchKeyNotFound(_) => ErrorKind::NotFound,
            AlreadyRegistered(_) | SlotOccupied { .. } | DuplicateMatch(_) => ErrorKind::Conflict,
            UnsupportedBracketType(_) | UnsupportedBracketSize { .. } => ErrorKind::Configuration,
            LockPoisoned => ErrorKind::Internal,
        }
    }
}

pub type TournamentResult<T> = Result<T, TournamentError>;
