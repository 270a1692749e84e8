//! Seeding: order the registered teams before bracket placement.

use crate::error::{TournamentError, TournamentResult};
use crate::models::{BracketType, TeamId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedMode {
    /// Uniform random permutation.
    Random,
    /// Keep the input order.
    Identity,
}

impl SeedMode {
    /// Round robin keeps registration order; seeding has no competitive effect there.
    pub fn for_bracket(bracket_type: BracketType) -> Self {
        match bracket_type {
            BracketType::SingleElimination | BracketType::DoubleElimination => SeedMode::Random,
            BracketType::RoundRobin => SeedMode::Identity,
        }
    }
}

/// Injected random source for seeding.
pub struct Seeder {
    rng: Mutex<StdRng>,
}

impl Seeder {
    /// Unpredictable seeding for production.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible seeding: the same seed yields the same sequence of permutations.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Order `teams` for placement. Requires at least two distinct teams.
    pub fn seed(&self, teams: &[TeamId], mode: SeedMode) -> TournamentResult<Vec<TeamId>> {
        let mut seen = HashSet::with_capacity(teams.len());
        if let Some(dup) = teams.iter().find(|t| !seen.insert(**t)) {
            return Err(TournamentError::Validation(format!(
                "team {dup} appears more than once"
            )));
        }
        if teams.len() < 2 {
            return Err(TournamentError::InsufficientTeams { got: teams.len() });
        }

        let mut ordered = teams.to_vec();
        if mode == SeedMode::Random {
            let mut rng = self.rng.lock().map_err(|_| TournamentError::LockPoisoned)?;
            ordered.shuffle(&mut *rng);
        }
        Ok(ordered)
    }
}

impl Default for Seeder {
    fn default() -> Self {
        Self::from_entropy()
    }
}
