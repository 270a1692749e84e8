//! Bracket business logic: seeding, builders, progression and the lifecycle service.

pub mod advancement;
mod double_elimination;
mod lifecycle;
mod progression;
mod registration;
mod round_robin;
mod seeding;
mod single_elimination;
mod standings;

pub use double_elimination::build_double_elimination;
pub use lifecycle::{build_bracket, TournamentService};
pub use progression::report_winner;
pub use registration::{parse_team_csv, register_team};
pub use round_robin::build_round_robin;
pub use seeding::{SeedMode, Seeder};
pub use single_elimination::build_single_elimination;
pub use standings::standings;
