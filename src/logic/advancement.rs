//! Advancement rules: where the winner (and, in double elimination, the loser) of a
//! finished match goes next.
//!
//! All slot arithmetic lives here so that every builder and the progression engine
//! agree on it.

use crate::error::{TournamentError, TournamentResult};
use crate::models::{
    BracketSide, BracketType, MatchKey, MatchSet, SlotPosition, SlotState, TeamId,
};
use log::debug;

/// Target of an advancing team: a match and the slot it fills there.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Advancement {
    pub to: MatchKey,
    pub position: SlotPosition,
}

impl Advancement {
    pub fn new(to: MatchKey, position: SlotPosition) -> Self {
        Self { to, position }
    }
}

/// Halving rule: round r match m feeds round r+1 match ceil(m/2), `team_1` if m is odd,
/// `team_2` if even. Stays on the same bracket side.
pub fn halving(key: MatchKey) -> Advancement {
    Advancement {
        to: MatchKey::new(key.side, key.round + 1, key.number.div_ceil(2)),
        position: SlotPosition::for_feeder(key.number),
    }
}

/// Rounds needed to reduce `teams` to one winner: ceil(log2(teams)).
pub fn elimination_rounds(teams: usize) -> u32 {
    teams.max(1).next_power_of_two().trailing_zeros()
}

/// Matches in `round` of an elimination bracket for `teams`: ceil(teams / 2^round), at least 1.
pub fn matches_in_round(teams: usize, round: u32) -> u32 {
    let per_match = 1usize << round;
    teams.div_ceil(per_match).max(1) as u32
}

/// Rounds in the losers bracket of a double elimination with `winners_rounds` winners rounds.
pub fn losers_rounds(winners_rounds: u32) -> u32 {
    2 * winners_rounds.saturating_sub(1)
}

/// Bracket-type-specific routing, derived from the stored matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Routing {
    SingleElimination { rounds: u32 },
    DoubleElimination { winners_rounds: u32 },
    RoundRobin,
}

impl Routing {
    pub fn for_matches(bracket_type: BracketType, matches: &MatchSet) -> Self {
        match bracket_type {
            BracketType::SingleElimination => Routing::SingleElimination {
                rounds: matches.rounds(BracketSide::Winners),
            },
            BracketType::DoubleElimination => Routing::DoubleElimination {
                winners_rounds: matches.rounds(BracketSide::Winners),
            },
            BracketType::RoundRobin => Routing::RoundRobin,
        }
    }

    /// Where the winner of `key` goes, or `None` if `key` is the last match of its path.
    pub fn winner_route(&self, key: MatchKey) -> Option<Advancement> {
        match *self {
            Routing::RoundRobin => None,
            Routing::SingleElimination { rounds } => {
                (key.side == BracketSide::Winners && key.round < rounds).then(|| halving(key))
            }
            Routing::DoubleElimination { winners_rounds } => {
                let final_round = losers_rounds(winners_rounds);
                match key.side {
                    BracketSide::Winners if key.round < winners_rounds => Some(halving(key)),
                    BracketSide::Winners => Some(Advancement::new(
                        MatchKey::grand_final(1),
                        SlotPosition::One,
                    )),
                    // Odd losers rounds feed the drop-in round with the same match count.
                    BracketSide::Losers if key.round % 2 == 1 => Some(Advancement::new(
                        MatchKey::losers(key.round + 1, key.number),
                        SlotPosition::One,
                    )),
                    BracketSide::Losers if key.round < final_round => Some(halving(key)),
                    BracketSide::Losers => Some(Advancement::new(
                        MatchKey::grand_final(1),
                        SlotPosition::Two,
                    )),
                    BracketSide::GrandFinal => None,
                }
            }
        }
    }

    /// Where the loser of `key` goes. Only winners-bracket losers of a double
    /// elimination get a second life.
    pub fn loser_route(&self, key: MatchKey) -> Option<Advancement> {
        let Routing::DoubleElimination { winners_rounds } = *self else {
            return None;
        };
        if key.side != BracketSide::Winners {
            return None;
        }
        if winners_rounds == 1 {
            return Some(Advancement::new(MatchKey::grand_final(1), SlotPosition::Two));
        }
        if key.round == 1 {
            return Some(Advancement::new(
                MatchKey::losers(1, key.number.div_ceil(2)),
                SlotPosition::for_feeder(key.number),
            ));
        }
        Some(Advancement::new(
            MatchKey::losers(2 * key.round - 2, key.number),
            SlotPosition::Two,
        ))
    }
}

/// Write `team` into the slot named by `adv`, then keep forwarding it through bye matches.
///
/// Returns `Some(team)` if the team ran past the last match of the bracket.
pub(crate) fn advance(
    matches: &mut MatchSet,
    routing: &Routing,
    adv: Advancement,
    team: TeamId,
) -> TournamentResult<Option<TeamId>> {
    let mut adv = adv;
    loop {
        let m = matches
            .get_mut(adv.to)
            .ok_or(TournamentError::MatchKeyNotFound(adv.to))?;
        let slot = m.slot_mut(adv.position);
        if !slot.is_pending() {
            return Err(TournamentError::SlotOccupied {
                key: adv.to,
                position: adv.position.index(),
            });
        }
        *slot = SlotState::Team(team);
        debug!("{} team_{} <- {}", adv.to, adv.position.index(), team);

        if !m.slot(adv.position.other()).is_bye() {
            return Ok(None);
        }
        m.winner = Some(team);
        m.is_completed = true;
        debug!("{} is a bye, {} advances", adv.to, team);

        match routing.winner_route(adv.to) {
            Some(next) => adv = next,
            None => return Ok(Some(team)),
        }
    }
}

/// Complete every bye match that already holds its lone team and forward that team.
pub(crate) fn settle_byes(
    matches: &mut MatchSet,
    routing: &Routing,
) -> TournamentResult<Option<TeamId>> {
    let ready: Vec<(MatchKey, TeamId)> = matches
        .iter()
        .filter(|m| !m.is_completed && m.is_bye())
        .filter_map(|m| Some((m.key, m.team_1.team().or(m.team_2.team())?)))
        .collect();

    let mut champion = None;
    for (key, team) in ready {
        if let Some(m) = matches.get_mut(key) {
            m.winner = Some(team);
            m.is_completed = true;
        }
        debug!("{} is a bye, {} advances", key, team);
        match routing.winner_route(key) {
            Some(next) => {
                if let Some(c) = advance(matches, routing, next, team)? {
                    champion = Some(c);
                }
            }
            None => champion = Some(team),
        }
    }
    Ok(champion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halving_picks_slot_by_parity() {
        assert_eq!(
            halving(MatchKey::winners(1, 1)),
            Advancement::new(MatchKey::winners(2, 1), SlotPosition::One)
        );
        assert_eq!(
            halving(MatchKey::winners(1, 2)),
            Advancement::new(MatchKey::winners(2, 1), SlotPosition::Two)
        );
        assert_eq!(
            halving(MatchKey::winners(2, 3)),
            Advancement::new(MatchKey::winners(3, 2), SlotPosition::One)
        );
        assert_eq!(
            halving(MatchKey::losers(4, 4)),
            Advancement::new(MatchKey::losers(5, 2), SlotPosition::Two)
        );
    }

    #[test]
    fn round_counts() {
        assert_eq!(elimination_rounds(2), 1);
        assert_eq!(elimination_rounds(3), 2);
        assert_eq!(elimination_rounds(4), 2);
        assert_eq!(elimination_rounds(5), 3);
        assert_eq!(elimination_rounds(16), 4);
        assert_eq!(elimination_rounds(17), 5);

        assert_eq!(matches_in_round(5, 1), 3);
        assert_eq!(matches_in_round(5, 2), 2);
        assert_eq!(matches_in_round(5, 3), 1);
        assert_eq!(matches_in_round(6, 2), 2);
        assert_eq!(matches_in_round(8, 3), 1);
    }

    #[test]
    fn single_elimination_final_has_no_route() {
        let routing = Routing::SingleElimination { rounds: 3 };
        assert!(routing.winner_route(MatchKey::winners(3, 1)).is_none());
        assert!(routing.loser_route(MatchKey::winners(1, 1)).is_none());
    }

    #[test]
    fn double_elimination_routes_for_eight_teams() {
        let routing = Routing::DoubleElimination { winners_rounds: 3 };

        // Winners round 1 losers pair up in losers round 1.
        assert_eq!(
            routing.loser_route(MatchKey::winners(1, 3)),
            Some(Advancement::new(MatchKey::losers(1, 2), SlotPosition::One))
        );
        assert_eq!(
            routing.loser_route(MatchKey::winners(1, 4)),
            Some(Advancement::new(MatchKey::losers(1, 2), SlotPosition::Two))
        );
        // Later winners losers drop into the even losers rounds.
        assert_eq!(
            routing.loser_route(MatchKey::winners(2, 2)),
            Some(Advancement::new(MatchKey::losers(2, 2), SlotPosition::Two))
        );
        assert_eq!(
            routing.loser_route(MatchKey::winners(3, 1)),
            Some(Advancement::new(MatchKey::losers(4, 1), SlotPosition::Two))
        );

        assert_eq!(
            routing.winner_route(MatchKey::losers(1, 2)),
            Some(Advancement::new(MatchKey::losers(2, 2), SlotPosition::One))
        );
        assert_eq!(
            routing.winner_route(MatchKey::losers(2, 2)),
            Some(Advancement::new(MatchKey::losers(3, 1), SlotPosition::Two))
        );
        assert_eq!(
            routing.winner_route(MatchKey::losers(4, 1)),
            Some(Advancement::new(MatchKey::grand_final(1), SlotPosition::Two))
        );
        assert_eq!(
            routing.winner_route(MatchKey::winners(3, 1)),
            Some(Advancement::new(MatchKey::grand_final(1), SlotPosition::One))
        );
        assert!(routing.winner_route(MatchKey::grand_final(1)).is_none());
        assert!(routing.loser_route(MatchKey::losers(2, 1)).is_none());
    }

    #[test]
    fn two_team_double_elimination_sends_loser_to_grand_final() {
        let routing = Routing::DoubleElimination { winners_rounds: 1 };
        assert_eq!(
            routing.loser_route(MatchKey::winners(1, 1)),
            Some(Advancement::new(MatchKey::grand_final(1), SlotPosition::Two))
        );
    }
}
