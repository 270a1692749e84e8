//! Win/loss table over contested matches.

use crate::models::{MatchSet, Standing, TeamId};

/// Standings for `teams`, most wins first, then fewest losses, then registration order.
/// Byes are not counted.
pub fn standings(teams: &[TeamId], matches: &MatchSet) -> Vec<Standing> {
    let mut table: Vec<Standing> = teams.iter().map(|&t| Standing::new(t)).collect();
    for m in matches.iter().filter(|m| m.is_contested()) {
        let (Some(winner), Some(loser)) = (m.winner, m.loser()) else {
            continue;
        };
        if let Some(s) = table.iter_mut().find(|s| s.team_id == winner) {
            s.add_win();
        }
        if let Some(s) = table.iter_mut().find(|s| s.team_id == loser) {
            s.add_loss();
        }
    }
    table.sort_by_key(|s| (std::cmp::Reverse(s.wins), s.losses));
    table
}
