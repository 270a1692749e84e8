//! Match records, their slots, and the ordered set a tournament's bracket is made of.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which part of the bracket a match belongs to.
///
/// Single elimination and round robin only use `Winners`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    Winners,
    Losers,
    GrandFinal,
}

impl fmt::Display for BracketSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BracketSide::Winners => "winners",
            BracketSide::Losers => "losers",
            BracketSide::GrandFinal => "grand_final",
        })
    }
}

/// Position of a match in the bracket: side, 1-based round, 1-based number within the round.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MatchKey {
    pub side: BracketSide,
    pub round: u32,
    pub number: u32,
}

impl MatchKey {
    pub const fn new(side: BracketSide, round: u32, number: u32) -> Self {
        Self {
            side,
            round,
            number,
        }
    }

    pub const fn winners(round: u32, number: u32) -> Self {
        Self::new(BracketSide::Winners, round, number)
    }

    pub const fn losers(round: u32, number: u32) -> Self {
        Self::new(BracketSide::Losers, round, number)
    }

    pub const fn grand_final(round: u32) -> Self {
        Self::new(BracketSide::GrandFinal, round, 1)
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} R{}M{}", self.side, self.round, self.number)
    }
}

/// One of the two team positions within a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    One,
    Two,
}

impl SlotPosition {
    /// Odd match numbers feed `One`, even ones feed `Two`.
    pub fn for_feeder(number: u32) -> Self {
        if number % 2 == 1 {
            SlotPosition::One
        } else {
            SlotPosition::Two
        }
    }

    pub fn other(self) -> Self {
        match self {
            SlotPosition::One => SlotPosition::Two,
            SlotPosition::Two => SlotPosition::One,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            SlotPosition::One => 1,
            SlotPosition::Two => 2,
        }
    }
}

/// What currently occupies a slot.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "team_id", rename_all = "snake_case")]
pub enum SlotState {
    /// Waiting for an upstream winner (or, in double elimination, loser).
    #[default]
    Pending,
    /// No opponent will ever arrive; the other slot advances automatically.
    Bye,
    Team(TeamId),
}

impl SlotState {
    pub fn team(self) -> Option<TeamId> {
        match self {
            SlotState::Team(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, SlotState::Pending)
    }

    pub fn is_bye(self) -> bool {
        matches!(self, SlotState::Bye)
    }
}

/// A single match record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    #[serde(flatten)]
    pub key: MatchKey,
    pub team_1: SlotState,
    pub team_2: SlotState,
    /// None until decided.
    pub winner: Option<TeamId>,
    pub is_completed: bool,
    pub scheduled_time: DateTime<Utc>,
}

impl Match {
    /// New match with both slots pending.
    pub fn new(tournament_id: TournamentId, key: MatchKey, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            key,
            team_1: SlotState::Pending,
            team_2: SlotState::Pending,
            winner: None,
            is_completed: false,
            scheduled_time,
        }
    }

    pub fn with_slots(mut self, team_1: SlotState, team_2: SlotState) -> Self {
        self.team_1 = team_1;
        self.team_2 = team_2;
        self
    }

    pub fn slot(&self, position: SlotPosition) -> SlotState {
        match position {
            SlotPosition::One => self.team_1,
            SlotPosition::Two => self.team_2,
        }
    }

    pub fn slot_mut(&mut self, position: SlotPosition) -> &mut SlotState {
        match position {
            SlotPosition::One => &mut self.team_1,
            SlotPosition::Two => &mut self.team_2,
        }
    }

    /// Slot holding `team`, if the team plays in this match.
    pub fn position_of(&self, team: TeamId) -> Option<SlotPosition> {
        if self.team_1 == SlotState::Team(team) {
            Some(SlotPosition::One)
        } else if self.team_2 == SlotState::Team(team) {
            Some(SlotPosition::Two)
        } else {
            None
        }
    }

    /// Both teams, once both slots are concrete.
    pub fn teams(&self) -> Option<(TeamId, TeamId)> {
        Some((self.team_1.team()?, self.team_2.team()?))
    }

    /// A bye match never has two opponents.
    pub fn is_bye(&self) -> bool {
        self.team_1.is_bye() || self.team_2.is_bye()
    }

    /// Completed by a reported result rather than a bye.
    pub fn is_contested(&self) -> bool {
        self.is_completed && !self.is_bye()
    }

    /// The defeated team of a contested, completed match.
    pub fn loser(&self) -> Option<TeamId> {
        let winner = self.winner?;
        let (one, two) = self.teams()?;
        if winner == one {
            Some(two)
        } else {
            Some(one)
        }
    }
}

/// All matches of one tournament, ordered by side, round and number.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Match>", into = "Vec<Match>")]
pub struct MatchSet {
    matches: BTreeMap<MatchKey, Match>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Insert a match. Returns the rejected match back if its key is taken.
    pub fn insert(&mut self, m: Match) -> Result<(), Match> {
        if self.matches.contains_key(&m.key) {
            return Err(m);
        }
        self.matches.insert(m.key, m);
        Ok(())
    }

    pub fn get(&self, key: MatchKey) -> Option<&Match> {
        self.matches.get(&key)
    }

    pub fn get_mut(&mut self, key: MatchKey) -> Option<&mut Match> {
        self.matches.get_mut(&key)
    }

    pub fn by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.values().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    /// Matches of one side, in round then number order.
    pub fn side(&self, side: BracketSide) -> impl Iterator<Item = &Match> {
        self.matches.values().filter(move |m| m.key.side == side)
    }

    /// Highest round number used on a side (0 if the side is empty).
    pub fn rounds(&self, side: BracketSide) -> u32 {
        self.side(side).map(|m| m.key.round).max().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.matches.clear();
    }

    pub fn all_completed(&self) -> bool {
        self.matches.values().all(|m| m.is_completed)
    }
}

impl From<Vec<Match>> for MatchSet {
    fn from(matches: Vec<Match>) -> Self {
        Self {
            matches: matches.into_iter().map(|m| (m.key, m)).collect(),
        }
    }
}

impl From<MatchSet> for Vec<Match> {
    fn from(set: MatchSet) -> Self {
        set.matches.into_values().collect()
    }
}
