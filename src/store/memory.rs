//! In-memory match store: one mutex per tournament behind a map-wide RwLock.

use super::{MatchStore, TournamentRecord};
use crate::error::{TournamentError, TournamentResult};
use crate::models::{Tournament, TournamentId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

type Entry = Arc<Mutex<TournamentRecord>>;

#[derive(Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map lock is held only long enough to clone the entry handle.
    fn entry(&self, id: TournamentId) -> TournamentResult<Entry> {
        let g = self
            .tournaments
            .read()
            .map_err(|_| TournamentError::LockPoisoned)?;
        g.get(&id)
            .cloned()
            .ok_or(TournamentError::TournamentNotFound(id))
    }
}

impl MatchStore for MemoryStore {
    fn insert(&self, tournament: Tournament) -> TournamentResult<()> {
        let mut g = self
            .tournaments
            .write()
            .map_err(|_| TournamentError::LockPoisoned)?;
        g.insert(
            tournament.id,
            Arc::new(Mutex::new(TournamentRecord::new(tournament))),
        );
        Ok(())
    }

    fn snapshot(&self, id: TournamentId) -> TournamentResult<TournamentRecord> {
        let entry = self.entry(id)?;
        let record = entry.lock().map_err(|_| TournamentError::LockPoisoned)?;
        Ok(record.clone())
    }

    fn list(&self) -> TournamentResult<Vec<Tournament>> {
        let entries: Vec<Entry> = {
            let g = self
                .tournaments
                .read()
                .map_err(|_| TournamentError::LockPoisoned)?;
            g.values().cloned().collect()
        };
        let mut tournaments = Vec::with_capacity(entries.len());
        for entry in entries {
            let record = entry.lock().map_err(|_| TournamentError::LockPoisoned)?;
            tournaments.push(record.tournament.clone());
        }
        tournaments.sort_by_key(|t| t.created_at);
        Ok(tournaments)
    }

    fn transaction<R, F>(&self, id: TournamentId, f: F) -> TournamentResult<R>
    where
        F: FnOnce(&mut TournamentRecord) -> TournamentResult<R>,
    {
        let entry = self.entry(id)?;
        let mut committed = entry.lock().map_err(|_| TournamentError::LockPoisoned)?;
        let mut working = committed.clone();
        let out = f(&mut working)?;
        *committed = working;
        Ok(out)
    }
}
