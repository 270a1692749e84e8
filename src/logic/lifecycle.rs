//! Tournament lifecycle: the orchestrator in front of the store, seeding, builders and
//! progression. Every mutating call is one store transaction.

use super::double_elimination::build_double_elimination;
use super::progression;
use super::registration::{parse_team_csv, register_team};
use super::round_robin::build_round_robin;
use super::seeding::{SeedMode, Seeder};
use super::single_elimination::build_single_elimination;
use super::standings::standings;
use crate::error::{TournamentError, TournamentResult};
use crate::models::{
    BracketStructure, BracketType, Match, MatchId, MatchKey, MatchSet, NewTournament,
    Participant, Standing, TeamId, Tournament, TournamentId,
};
use crate::store::{MatchStore, TournamentRecord};
use log::info;
use std::io::Read;

/// Dispatch to the builder for `tournament.bracket_type`.
pub fn build_bracket(tournament: &Tournament, seeded: &[TeamId]) -> TournamentResult<MatchSet> {
    match tournament.bracket_type {
        BracketType::SingleElimination => build_single_elimination(tournament, seeded),
        BracketType::DoubleElimination => build_double_elimination(tournament, seeded),
        BracketType::RoundRobin => build_round_robin(tournament, seeded),
    }
}

pub struct TournamentService<S> {
    store: S,
    seeder: Seeder,
}

impl<S: MatchStore> TournamentService<S> {
    pub fn new(store: S, seeder: Seeder) -> Self {
        Self { store, seeder }
    }

    pub fn create_tournament(&self, req: NewTournament) -> TournamentResult<Tournament> {
        let tournament = Tournament::create(req)?;
        self.store.insert(tournament.clone())?;
        info!(
            "Created {} tournament {} ({})",
            tournament.bracket_type, tournament.id, tournament.name
        );
        Ok(tournament)
    }

    pub fn tournament(&self, id: TournamentId) -> TournamentResult<Tournament> {
        Ok(self.store.snapshot(id)?.tournament)
    }

    pub fn tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        self.store.list()
    }

    pub fn register_team(&self, id: TournamentId, team: TeamId) -> TournamentResult<Participant> {
        self.store
            .transaction(id, |record| register_team(record, team))
    }

    /// Register every team listed in a CSV document. All or nothing.
    pub fn import_participants_csv<R: Read>(
        &self,
        id: TournamentId,
        reader: R,
    ) -> TournamentResult<Vec<Participant>> {
        let teams = parse_team_csv(reader)?;
        self.store.transaction(id, |record| {
            teams
                .iter()
                .map(|&team| register_team(record, team))
                .collect()
        })
    }

    /// Participants in registration order.
    pub fn participants(&self, id: TournamentId) -> TournamentResult<Vec<Participant>> {
        Ok(self.store.snapshot(id)?.participants)
    }

    /// Generate the bracket of a tournament that has not started yet.
    pub fn generate_bracket(&self, id: TournamentId) -> TournamentResult<BracketStructure> {
        self.store.transaction(id, |record| {
            let registered = record.participants.len();
            if registered < 2 {
                return Err(TournamentError::TooFewParticipants { registered });
            }
            if record.tournament.is_started {
                return Err(TournamentError::AlreadyStarted);
            }
            self.generate_in(record)
        })
    }

    /// Throw away the current bracket and draw a new one.
    ///
    /// Allowed until the first contested result is reported; byes do not count.
    pub fn regenerate_bracket(&self, id: TournamentId) -> TournamentResult<BracketStructure> {
        self.store.transaction(id, |record| {
            let registered = record.participants.len();
            if registered < 2 {
                return Err(TournamentError::TooFewParticipants { registered });
            }
            if record.matches.iter().any(|m| m.is_contested()) {
                return Err(TournamentError::ResultsAlreadyReported);
            }
            info!(
                "Regenerating bracket for {} ({} matches cleared)",
                id,
                record.matches.len()
            );
            record.tournament.is_started = false;
            self.generate_in(record)
        })
    }

    fn generate_in(&self, record: &mut TournamentRecord) -> TournamentResult<BracketStructure> {
        let bracket_type = record.tournament.bracket_type;
        record.clear_matches();

        let seeded = self
            .seeder
            .seed(&record.team_ids(), SeedMode::for_bracket(bracket_type))?;
        let matches = build_bracket(&record.tournament, &seeded)?;
        record.create_matches(matches.into())?;

        let structure = BracketStructure::from_matches(bracket_type, &record.matches);
        record.tournament.bracket_structure = Some(structure.clone());
        record.tournament.is_started = true;
        info!(
            "Generated {} bracket for {}: {} teams, {} matches",
            bracket_type,
            record.tournament.id,
            seeded.len(),
            record.matches.len()
        );
        Ok(structure)
    }

    pub fn report_winner(
        &self,
        id: TournamentId,
        match_id: MatchId,
        winner: TeamId,
    ) -> TournamentResult<Match> {
        self.store.transaction(id, |record| {
            progression::report_winner(record, match_id, winner)
        })
    }

    /// Current bracket, rebuilt from the stored matches.
    pub fn bracket(&self, id: TournamentId) -> TournamentResult<BracketStructure> {
        let record = self.store.snapshot(id)?;
        Ok(BracketStructure::from_matches(
            record.tournament.bracket_type,
            &record.matches,
        ))
    }

    pub fn matches(&self, id: TournamentId) -> TournamentResult<Vec<Match>> {
        Ok(self.store.snapshot(id)?.matches.into())
    }

    pub fn get_match(&self, id: TournamentId, key: MatchKey) -> TournamentResult<Match> {
        let record = self.store.snapshot(id)?;
        record.get_match(key).cloned()
    }

    pub fn standings(&self, id: TournamentId) -> TournamentResult<Vec<Standing>> {
        let record = self.store.snapshot(id)?;
        Ok(standings(&record.team_ids(), &record.matches))
    }
}
