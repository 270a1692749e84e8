//! Progression: apply a reported result and move teams to their next matches.

use super::advancement::{advance, Routing};
use crate::error::{TournamentError, TournamentResult};
use crate::models::{Match, MatchId, MatchKey, SlotPosition, SlotState, TeamId};
use crate::store::TournamentRecord;
use log::{info, warn};

/// Record `winner` as the winner of `match_id` and advance the bracket.
///
/// Errors leave the record untouched as long as the caller discards it, which
/// [`MatchStore::transaction`](crate::store::MatchStore::transaction) does.
pub fn report_winner(
    record: &mut TournamentRecord,
    match_id: MatchId,
    winner: TeamId,
) -> TournamentResult<Match> {
    let current = record.match_by_id(match_id)?.clone();
    let Some(position) = current.position_of(winner) else {
        warn!("Rejected result for {}: team {} is not playing", current.key, winner);
        return Err(TournamentError::InvalidWinner {
            match_id,
            team: winner,
        });
    };
    if current.is_completed {
        warn!("Rejected result for {}: already completed", current.key);
        return Err(TournamentError::AlreadyCompleted(match_id));
    }
    let loser = current
        .slot(position.other())
        .team()
        .ok_or(TournamentError::MatchNotReady(match_id))?;

    let mut decided = current;
    decided.winner = Some(winner);
    decided.is_completed = true;
    record.update_match(decided.clone())?;
    info!("{} won by {} over {}", decided.key, winner, loser);

    let routing = Routing::for_matches(record.tournament.bracket_type, &record.matches);

    if let Some(adv) = routing.loser_route(decided.key) {
        advance(&mut record.matches, &routing, adv, loser)?;
    }

    match routing.winner_route(decided.key) {
        Some(adv) => {
            if let Some(champion) = advance(&mut record.matches, &routing, adv, winner)? {
                finish(record, Some(champion));
            }
        }
        None => match routing {
            Routing::RoundRobin => {
                if record.matches.all_completed() {
                    finish(record, None);
                }
            }
            Routing::DoubleElimination { .. }
                if decided.key == MatchKey::grand_final(1)
                    && position == SlotPosition::Two
                    && record.tournament.bracket_reset =>
            {
                create_reset(record, &decided)?;
            }
            _ => finish(record, Some(winner)),
        },
    }

    Ok(decided)
}

/// The losers-bracket champion took the first grand final: both teams now have one loss.
fn create_reset(record: &mut TournamentRecord, grand_final: &Match) -> TournamentResult<()> {
    let (one, two) = grand_final
        .teams()
        .ok_or(TournamentError::MatchNotReady(grand_final.id))?;
    let reset = Match::new(
        record.tournament.id,
        MatchKey::grand_final(2),
        record
            .tournament
            .schedule_after(grand_final.scheduled_time, 1)?,
    )
    .with_slots(SlotState::Team(one), SlotState::Team(two));
    info!("Bracket reset: {} vs {}", one, two);
    record.create_matches(vec![reset])
}

fn finish(record: &mut TournamentRecord, champion: Option<TeamId>) {
    record.tournament.is_completed = true;
    record.tournament.champion = champion;
    match champion {
        Some(team) => info!("Tournament {} completed, champion {}", record.tournament.id, team),
        None => info!("Tournament {} completed", record.tournament.id),
    }
}
