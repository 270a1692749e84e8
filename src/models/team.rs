//! Team references and tournament participants.

use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque team identifier owned by the team registry.
pub type TeamId = Uuid;

/// A team registered for a tournament. Never mutated after registration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(tournament_id: TournamentId, team_id: TeamId) -> Self {
        Self {
            tournament_id,
            team_id,
            registered_at: Utc::now(),
        }
    }
}

/// Win/loss record of a team over its contested matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
}

impl Standing {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Default::default()
        }
    }

    /// Record a win for this team.
    pub fn add_win(&mut self) {
        self.played += 1;
        self.wins += 1;
    }

    /// Record a loss for this team.
    pub fn add_loss(&mut self) {
        self.played += 1;
        self.losses += 1;
    }
}
