//! Round robin: every team meets every other team once.

use crate::error::{TournamentError, TournamentResult};
use crate::models::{Match, MatchKey, MatchSet, SlotState, TeamId, Tournament};

/// One match per unordered pair (i, j), i < j in seeded order.
///
/// All matches sit in round 1; the number doubles as the schedule offset
/// (match n is played n-1 time units after the start).
pub fn build_round_robin(tournament: &Tournament, seeded: &[TeamId]) -> TournamentResult<MatchSet> {
    let n = seeded.len();
    if n < 2 {
        return Err(TournamentError::InsufficientTeams { got: n });
    }

    let mut out = Vec::with_capacity(n * (n - 1) / 2);
    let mut number = 1u32;
    for (i, &home) in seeded.iter().enumerate() {
        for &away in &seeded[i + 1..] {
            out.push(
                Match::new(
                    tournament.id,
                    MatchKey::winners(1, number),
                    tournament.scheduled_at(number - 1)?,
                )
                .with_slots(SlotState::Team(home), SlotState::Team(away)),
            );
            number += 1;
        }
    }
    Ok(MatchSet::from(out))
}
