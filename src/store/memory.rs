//! In-memory store, with switches to make writes fail.

use super::{CompletionSummary, ResultRow, ResultStore, RosterSource, StoreError, TournamentRecord};
use crate::models::{ParticipantId, TournamentId};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct Inner {
    tournaments: HashMap<TournamentId, TournamentRecord>,
    results: Vec<ResultRow>,
    completions: Vec<CompletionSummary>,
    /// Result writes for this participant fail.
    fail_results_for: Option<ParticipantId>,
    fail_completions: bool,
}

/// Roster catalogue and result log held in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tournament in the catalogue (replaces any existing entry).
    pub fn add_tournament(
        &self,
        id: impl Into<TournamentId>,
        format: impl Into<String>,
        roster: Vec<ParticipantId>,
    ) {
        let id = id.into();
        let record = TournamentRecord {
            id: id.clone(),
            format: format.into(),
            roster,
        };
        self.inner.lock().tournaments.insert(id, record);
    }

    /// Make result writes for `participant` fail (`None` clears it).
    pub fn fail_results_for(&self, participant: Option<&str>) {
        self.inner.lock().fail_results_for = participant.map(str::to_string);
    }

    pub fn fail_completions(&self, fail: bool) {
        self.inner.lock().fail_completions = fail;
    }

    /// Result rows written so far, in first-write order. A rewrite of the same
    /// (tournament, contest, participant) replaces the earlier row.
    pub fn results(&self) -> Vec<ResultRow> {
        self.inner.lock().results.clone()
    }

    pub fn completions(&self) -> Vec<CompletionSummary> {
        self.inner.lock().completions.clone()
    }
}

impl ResultStore for MemoryStore {
    fn record_result(&self, row: &ResultRow) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.fail_results_for.as_deref() == Some(row.participant.as_str()) {
            return Err(StoreError::Unavailable(format!(
                "refusing result for {}",
                row.participant
            )));
        }
        let existing = inner.results.iter().position(|r| {
            r.tournament_id == row.tournament_id
                && r.contest_id == row.contest_id
                && r.participant == row.participant
        });
        match existing {
            Some(i) => inner.results[i] = row.clone(),
            None => inner.results.push(row.clone()),
        }
        Ok(())
    }

    fn record_completion(&self, summary: &CompletionSummary) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.fail_completions {
            return Err(StoreError::Unavailable("refusing completion".to_string()));
        }
        inner.completions.push(summary.clone());
        Ok(())
    }
}

impl RosterSource for MemoryStore {
    fn lookup(&self, tournament_id: &str) -> Result<TournamentRecord, StoreError> {
        self.inner
            .lock()
            .tournaments
            .get(tournament_id)
            .cloned()
            .ok_or_else(|| StoreError::TournamentNotFound(tournament_id.to_string()))
    }
}
