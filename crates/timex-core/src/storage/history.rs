//! Stopwatch session history.
//!
//! Append-only log of completed stopwatch runs, persisted under the
//! `timex-stopwatch-history` key as a most-recent-first JSON array.

use serde::{Deserialize, Serialize};

use super::{JsonStore, HISTORY_KEY};
use crate::error::StorageError;

/// One complete start-to-stop stopwatch run. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchSession {
    pub id: String,
    /// Formatted time of day the session started, `HH:MM:SS`.
    pub start_time: String,
    /// Formatted time of day the session was stopped.
    pub end_time: String,
    pub duration_ms: u64,
    pub laps_count: u32,
    /// Long-form Spanish date of the session start.
    pub date: String,
}

/// Owns the persisted session log; sole writer of the history record.
#[derive(Debug, Clone)]
pub struct History {
    store: JsonStore,
    sessions: Vec<StopwatchSession>,
}

impl History {
    /// Load from the store; unreadable history reads as empty.
    pub fn load(store: JsonStore) -> Self {
        let sessions = store.get(HISTORY_KEY).unwrap_or_default();
        Self { store, sessions }
    }

    /// Sessions, most recent first.
    pub fn list(&self) -> &[StopwatchSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Prepend a newly completed session and persist.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn add(&mut self, session: StopwatchSession) -> Result<(), StorageError> {
        self.sessions.insert(0, session);
        self.persist()
    }

    /// Delete one session by id. Returns whether anything was removed.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Drop every session.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.sessions.clear();
        self.persist()
    }

    /// Export-ready snapshot of the full history.
    pub fn export_all(&self) -> Vec<StopwatchSession> {
        self.sessions.clone()
    }

    /// Export-ready snapshot of one session.
    pub fn export_one(&self, id: &str) -> Option<&StopwatchSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.set(HISTORY_KEY, &self.sessions)
    }
}
