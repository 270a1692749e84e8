//! Single-elimination bracket: consecutive pairing in round 1, halving rounds after that.

use super::advancement::{elimination_rounds, matches_in_round, settle_byes, Routing};
use crate::error::{TournamentError, TournamentResult};
use crate::models::{Match, MatchKey, MatchSet, SlotState, TeamId, Tournament};

/// Build the bracket for `seeded` teams, with round-1 byes already resolved.
///
/// Round 1 match k gets seeds `2k-2` and `2k-1`; an odd team out gets a bye. Round r holds
/// ceil(N / 2^r) matches, the last of which has a `bye` in `team_2` when round r-1 has an odd
/// number of matches.
pub fn build_single_elimination(
    tournament: &Tournament,
    seeded: &[TeamId],
) -> TournamentResult<MatchSet> {
    if seeded.len() < 2 {
        return Err(TournamentError::InsufficientTeams { got: seeded.len() });
    }
    let mut matches = MatchSet::from(winners_bracket(tournament, seeded)?);
    let routing = Routing::SingleElimination {
        rounds: elimination_rounds(seeded.len()),
    };
    settle_byes(&mut matches, &routing)?;
    Ok(matches)
}

/// Winners-side matches shared by single and double elimination. Byes are left unresolved.
pub(crate) fn winners_bracket(
    tournament: &Tournament,
    seeded: &[TeamId],
) -> TournamentResult<Vec<Match>> {
    let n = seeded.len();
    let mut out = Vec::new();

    for (i, pair) in seeded.chunks(2).enumerate() {
        let team_2 = pair.get(1).map_or(SlotState::Bye, |t| SlotState::Team(*t));
        out.push(
            Match::new(
                tournament.id,
                MatchKey::winners(1, i as u32 + 1),
                tournament.scheduled_at(0)?,
            )
            .with_slots(SlotState::Team(pair[0]), team_2),
        );
    }

    for round in 2..=elimination_rounds(n) {
        let feeders = matches_in_round(n, round - 1);
        for number in 1..=matches_in_round(n, round) {
            let team_2 = if 2 * number <= feeders {
                SlotState::Pending
            } else {
                SlotState::Bye
            };
            out.push(
                Match::new(
                    tournament.id,
                    MatchKey::winners(round, number),
                    tournament.scheduled_at(round - 1)?,
                )
                .with_slots(SlotState::Pending, team_2),
            );
        }
    }
    Ok(out)
}
