//! Match store: the single source of truth for tournaments, participants and matches.
//!
//! Every mutation goes through [`MatchStore::transaction`], which hands the closure a
//! working copy of one tournament's record and commits it only if the closure succeeds.
//! Implementations must serialize transactions on the same tournament.

mod memory;

pub use memory::MemoryStore;

use crate::error::{TournamentError, TournamentResult};
use crate::models::{
    Match, MatchId, MatchKey, MatchSet, Participant, TeamId, Tournament, TournamentId,
};
use serde::{Deserialize, Serialize};

/// Everything persisted for one tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub tournament: Tournament,
    /// In registration order.
    pub participants: Vec<Participant>,
    pub matches: MatchSet,
}

impl TournamentRecord {
    pub fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            participants: Vec::new(),
            matches: MatchSet::new(),
        }
    }

    /// Registered team ids, in registration order.
    pub fn team_ids(&self) -> Vec<TeamId> {
        self.participants.iter().map(|p| p.team_id).collect()
    }

    pub fn is_registered(&self, team: TeamId) -> bool {
        self.participants.iter().any(|p| p.team_id == team)
    }

    /// Insert a batch of matches; fails without inserting anything if a key is taken.
    pub fn create_matches(&mut self, batch: Vec<Match>) -> TournamentResult<()> {
        let mut staged = self.matches.clone();
        for m in batch {
            staged
                .insert(m)
                .map_err(|rejected| TournamentError::DuplicateMatch(rejected.key))?;
        }
        self.matches = staged;
        Ok(())
    }

    /// Remove every match of the tournament.
    pub fn clear_matches(&mut self) {
        self.matches.clear();
    }

    pub fn get_match(&self, key: MatchKey) -> TournamentResult<&Match> {
        self.matches
            .get(key)
            .ok_or(TournamentError::MatchKeyNotFound(key))
    }

    pub fn match_by_id(&self, id: MatchId) -> TournamentResult<&Match> {
        self.matches.by_id(id).ok_or(TournamentError::MatchNotFound(id))
    }

    /// Replace the stored match with the same key and id.
    pub fn update_match(&mut self, updated: Match) -> TournamentResult<()> {
        let slot = self
            .matches
            .get_mut(updated.key)
            .filter(|m| m.id == updated.id)
            .ok_or(TournamentError::MatchNotFound(updated.id))?;
        *slot = updated;
        Ok(())
    }
}

/// Persistence boundary of the engine.
pub trait MatchStore: Send + Sync {
    /// Add a new tournament with no participants or matches.
    fn insert(&self, tournament: Tournament) -> TournamentResult<()>;

    /// Consistent copy of a tournament's record.
    fn snapshot(&self, id: TournamentId) -> TournamentResult<TournamentRecord>;

    fn list(&self) -> TournamentResult<Vec<Tournament>>;

    /// Run `f` against one tournament as a single atomic unit.
    ///
    /// Changes are visible to other callers only if `f` returns `Ok`. Concurrent
    /// transactions on the same tournament run one after the other.
    fn transaction<R, F>(&self, id: TournamentId, f: F) -> TournamentResult<R>
    where
        F: FnOnce(&mut TournamentRecord) -> TournamentResult<R>;
}
