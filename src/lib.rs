//! Tournament brackets: bracket generation and match progression for single elimination,
//! double elimination and round robin, with a transactional match store.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use error::{ErrorKind, TournamentError, TournamentResult};
pub use logic::{
    build_bracket, build_double_elimination, build_round_robin, build_single_elimination,
    parse_team_csv, register_team, report_winner, standings, SeedMode, Seeder, TournamentService,
};
pub use models::{
    BracketRound, BracketSection, BracketSide, BracketStructure, BracketType, Match, MatchId,
    MatchKey, MatchSet, MatchSummary, NewTournament, Participant, SlotPosition, SlotState,
    Standing, TeamId, Tournament, TournamentId, DEFAULT_ROUND_SPACING_HOURS,
};
pub use store::{MatchStore, MemoryStore, TournamentRecord};
