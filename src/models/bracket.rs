//! Presentation view of a bracket: sections → rounds → match summaries.
//!
//! Always derived from the match records; never the source of truth.

use crate::models::matches::{BracketSide, Match, MatchId, MatchSet, SlotState};
use crate::models::team::TeamId;
use crate::models::tournament::BracketType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: MatchId,
    pub number: u32,
    pub team_1: SlotState,
    pub team_2: SlotState,
    pub winner: Option<TeamId>,
    pub is_completed: bool,
    pub scheduled_time: DateTime<Utc>,
}

impl From<&Match> for MatchSummary {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id,
            number: m.key.number,
            team_1: m.team_1,
            team_2: m.team_2,
            winner: m.winner,
            is_completed: m.is_completed,
            scheduled_time: m.scheduled_time,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub round: u32,
    pub matches: Vec<MatchSummary>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSection {
    pub side: BracketSide,
    pub rounds: Vec<BracketRound>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketStructure {
    pub bracket_type: BracketType,
    pub sections: Vec<BracketSection>,
}

impl BracketStructure {
    /// Group matches by side and round. Relies on `MatchSet` iterating in key order.
    pub fn from_matches(bracket_type: BracketType, matches: &MatchSet) -> Self {
        let mut sections: Vec<BracketSection> = Vec::new();
        for m in matches.iter() {
            if sections.last().map(|s| s.side) != Some(m.key.side) {
                sections.push(BracketSection {
                    side: m.key.side,
                    rounds: Vec::new(),
                });
            }
            let Some(section) = sections.last_mut() else {
                continue;
            };
            if section.rounds.last().map(|r| r.round) != Some(m.key.round) {
                section.rounds.push(BracketRound {
                    round: m.key.round,
                    matches: Vec::new(),
                });
            }
            if let Some(round) = section.rounds.last_mut() {
                round.matches.push(MatchSummary::from(m));
            }
        }
        Self {
            bracket_type,
            sections,
        }
    }

    pub fn section(&self, side: BracketSide) -> Option<&BracketSection> {
        self.sections.iter().find(|s| s.side == side)
    }

    pub fn match_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.rounds.iter())
            .map(|r| r.matches.len())
            .sum()
    }
}
