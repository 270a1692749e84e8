//! Data structures for tournaments: teams, matches, bracket views.

mod bracket;
mod matches;
mod team;
mod tournament;

pub use bracket::{BracketRound, BracketSection, BracketStructure, MatchSummary};
pub use matches::{BracketSide, Match, MatchId, MatchKey, MatchSet, SlotPosition, SlotState};
pub use team::{Participant, Standing, TeamId};
pub use tournament::{
    BracketType, NewTournament, Tournament, TournamentId, DEFAULT_ROUND_SPACING_HOURS,
};
