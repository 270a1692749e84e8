//! Server configuration from the environment.
//!
//! - `HOST` (default `0.0.0.0`)
//! - `PORT` (default `8080`)
//! - `BRACKET_SEED`: optional u64; fixes the seeding RNG so brackets can be replayed.

use crate::error::{TournamentError, TournamentResult};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub bracket_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            bracket_seed: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> TournamentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> TournamentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host.trim().to_string();
        }
        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|_| {
                TournamentError::Validation(format!("PORT must be a port number, got {port:?}"))
            })?;
        }
        if let Some(seed) = get("BRACKET_SEED") {
            config.bracket_seed = Some(seed.trim().parse().map_err(|_| {
                TournamentError::Validation(format!(
                    "BRACKET_SEED must be an unsigned integer, got {seed:?}"
                ))
            })?);
        }
        Ok(config)
    }
}
