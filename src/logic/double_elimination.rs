//! Double elimination: winners bracket, losers bracket and grand final.
//!
//! Only power-of-two team counts are supported. With k = log2(N):
//!
//! - winners rounds 1..=k are laid out exactly as in single elimination;
//! - losers round 1 pairs the winners round 1 losers by the halving rule;
//! - the loser of winners round r >= 2 match m drops into losers round 2r-2 match m, `team_2`;
//! - odd losers rounds feed the next round's match of the same number (`team_1`), even
//!   losers rounds advance by the halving rule;
//! - the losers final (round 2k-2) feeds `team_2` of the grand final, the winners final
//!   feeds `team_1`.
//!
//! The grand-final reset match is created by the progression engine when needed.

use super::advancement::{elimination_rounds, losers_rounds, settle_byes, Routing};
use super::single_elimination::winners_bracket;
use crate::error::{TournamentError, TournamentResult};
use crate::models::{BracketType, Match, MatchKey, MatchSet, TeamId, Tournament};

pub fn build_double_elimination(
    tournament: &Tournament,
    seeded: &[TeamId],
) -> TournamentResult<MatchSet> {
    let n = seeded.len();
    if n < 2 {
        return Err(TournamentError::InsufficientTeams { got: n });
    }
    if !n.is_power_of_two() {
        return Err(TournamentError::UnsupportedBracketSize {
            bracket_type: BracketType::DoubleElimination,
            teams: n,
        });
    }

    let winners_rounds = elimination_rounds(n);
    let final_losers_round = losers_rounds(winners_rounds);
    let mut out = winners_bracket(tournament, seeded)?;

    for round in 1..=final_losers_round {
        // Rounds 2i-1 and 2i both hold N / 2^(i+1) matches.
        let count = n >> (round.div_ceil(2) + 1);
        for number in 1..=count as u32 {
            out.push(Match::new(
                tournament.id,
                MatchKey::losers(round, number),
                tournament.scheduled_at(round)?,
            ));
        }
    }

    let grand_final_offset = final_losers_round.max(winners_rounds - 1) + 1;
    out.push(Match::new(
        tournament.id,
        MatchKey::grand_final(1),
        tournament.scheduled_at(grand_final_offset)?,
    ));

    let mut matches = MatchSet::from(out);
    settle_byes(&mut matches, &Routing::DoubleElimination { winners_rounds })?;
    Ok(matches)
}

