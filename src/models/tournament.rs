//! Tournament, BracketType and the request shape used to create one.

use crate::error::TournamentError;
use crate::models::bracket::BracketStructure;
use crate::models::team::TeamId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Default spacing between scheduled rounds: one day.
pub const DEFAULT_ROUND_SPACING_HOURS: u32 = 24;

/// Bracket format. Closed set; anything else is a configuration error.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BracketType {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
}

impl BracketType {
    pub fn as_str(self) -> &'static str {
        match self {
            BracketType::SingleElimination => "SINGLE_ELIMINATION",
            BracketType::DoubleElimination => "DOUBLE_ELIMINATION",
            BracketType::RoundRobin => "ROUND_ROBIN",
        }
    }
}

impl fmt::Display for BracketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BracketType {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SINGLE_ELIMINATION" => Ok(BracketType::SingleElimination),
            "DOUBLE_ELIMINATION" => Ok(BracketType::DoubleElimination),
            "ROUND_ROBIN" => Ok(BracketType::RoundRobin),
            _ => Err(TournamentError::UnsupportedBracketType(s.to_string())),
        }
    }
}

/// Parameters for a new tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewTournament {
    pub name: String,
    pub bracket_type: BracketType,
    /// Maximum number of registered teams.
    pub capacity: usize,
    pub start_date: DateTime<Utc>,
    #[serde(default = "default_round_spacing_hours")]
    pub round_spacing_hours: u32,
    /// Double elimination: play a second grand final if the losers-bracket champion wins the first.
    #[serde(default = "default_bracket_reset")]
    pub bracket_reset: bool,
}

fn default_round_spacing_hours() -> u32 {
    DEFAULT_ROUND_SPACING_HOURS
}

fn default_bracket_reset() -> bool {
    true
}

impl NewTournament {
    pub fn new(name: impl Into<String>, bracket_type: BracketType, capacity: usize) -> Self {
        Self {
            name: name.into(),
            bracket_type,
            capacity,
            start_date: Utc::now(),
            round_spacing_hours: DEFAULT_ROUND_SPACING_HOURS,
            bracket_reset: true,
        }
    }

    pub fn starting_at(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn without_bracket_reset(mut self) -> Self {
        self.bracket_reset = false;
        self
    }
}

/// A tournament as held by the match store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub bracket_type: BracketType,
    pub capacity: usize,
    pub start_date: DateTime<Utc>,
    pub round_spacing_hours: u32,
    pub bracket_reset: bool,
    /// Set once a bracket has been generated; cleared only by regeneration.
    pub is_started: bool,
    pub is_completed: bool,
    /// Winner of an elimination bracket. Round robin leaves ranking to callers.
    pub champion: Option<TeamId>,
    /// Snapshot taken at generation time, for display.
    pub bracket_structure: Option<BracketStructure>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Validate the request and create a tournament that has not started.
    pub fn create(req: NewTournament) -> Result<Self, TournamentError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(TournamentError::Validation("name must not be empty".into()));
        }
        if req.capacity < 2 {
            return Err(TournamentError::Validation(format!(
                "capacity must be at least 2 (got {})",
                req.capacity
            )));
        }
        if req.round_spacing_hours == 0 {
            return Err(TournamentError::Validation(
                "round_spacing_hours must be positive".into(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bracket_type: req.bracket_type,
            capacity: req.capacity,
            start_date: req.start_date,
            round_spacing_hours: req.round_spacing_hours,
            bracket_reset: req.bracket_reset,
            is_started: false,
            is_completed: false,
            champion: None,
            bracket_structure: None,
            created_at: Utc::now(),
        })
    }

    /// One scheduling time unit.
    pub fn round_spacing(&self) -> Duration {
        Duration::hours(i64::from(self.round_spacing_hours))
    }

    /// Scheduled time `offset` time units after the start date.
    pub fn scheduled_at(&self, offset: u32) -> Result<DateTime<Utc>, TournamentError> {
        self.schedule_after(self.start_date, offset)
    }

    /// `offset` time units after `from`. Fails instead of overflowing the calendar.
    pub fn schedule_after(
        &self,
        from: DateTime<Utc>,
        offset: u32,
    ) -> Result<DateTime<Utc>, TournamentError> {
        i32::try_from(offset)
            .ok()
            .and_then(|units| self.round_spacing().checked_mul(units))
            .and_then(|delta| from.checked_add_signed(delta))
            .ok_or_else(|| {
                TournamentError::Validation(format!(
                    "schedule overflows: {offset} x {}h after {from}",
                    self.round_spacing_hours
                ))
            })
    }
}
