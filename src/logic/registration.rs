//! Participant registration: one slot per team, bounded by capacity.

use crate::error::{TournamentError, TournamentResult};
use crate::models::{Participant, TeamId};
use crate::store::TournamentRecord;
use log::info;
use serde::Deserialize;
use std::io::Read;

/// Register `team` for the tournament held in `record`.
pub fn register_team(record: &mut TournamentRecord, team: TeamId) -> TournamentResult<Participant> {
    if record.tournament.is_started {
        return Err(TournamentError::AlreadyStarted);
    }
    if record.is_registered(team) {
        return Err(TournamentError::AlreadyRegistered(team));
    }
    let capacity = record.tournament.capacity;
    if record.participants.len() >= capacity {
        return Err(TournamentError::TournamentFull { capacity });
    }

    let participant = Participant::new(record.tournament.id, team);
    record.participants.push(participant.clone());
    info!(
        "Team {} registered for {} ({}/{})",
        team,
        record.tournament.id,
        record.participants.len(),
        capacity
    );
    Ok(participant)
}

#[derive(Deserialize)]
struct TeamRow {
    team_id: TeamId,
}

/// Read team ids from CSV with a `team_id` header column. Other columns are ignored.
pub fn parse_team_csv<R: Read>(reader: R) -> TournamentResult<Vec<TeamId>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut teams = Vec::new();
    for row in rdr.deserialize::<TeamRow>() {
        teams.push(row?.team_id);
    }
    if teams.is_empty() {
        return Err(TournamentError::Validation("CSV contains no teams".into()));
    }
    Ok(teams)
}
