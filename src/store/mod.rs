//! Collaborators the registry talks to: result persistence and roster lookup.
//!
//! The registry only sees the traits. `MemoryStore` backs tests and embedding;
//! `CsvStore` keeps everything in a directory of CSV files.

mod csv_store;
mod memory;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;

use crate::models::{ContestId, ParticipantId, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a persistence or lookup collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// One participant's ranked result in one contest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub tournament_id: TournamentId,
    pub contest_id: ContestId,
    pub participant: ParticipantId,
    pub position: usize,
    pub elapsed_ms: u64,
}

/// Written once when a bracket produces its winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub tournament_id: TournamentId,
    pub winner: ParticipantId,
    pub total_rounds: u32,
    pub contests_played: usize,
    pub completed_at: DateTime<Utc>,
}

/// A tournament as configured in the catalogue.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TournamentRecord {
    pub id: TournamentId,
    /// Raw format string, e.g. `solo_single_elim`.
    pub format: String,
    /// Participants in seeding order.
    pub roster: Vec<ParticipantId>,
}

/// Durable storage for contest results and tournament completion.
pub trait ResultStore: Send + Sync {
    /// Record one ranked row. A submission that fails part way is retried with the same
    /// rows, so writes should be idempotent per (tournament, contest, participant).
    fn record_result(&self, row: &ResultRow) -> Result<(), StoreError>;

    fn record_completion(&self, summary: &CompletionSummary) -> Result<(), StoreError>;
}

/// Looks up a tournament's format and roster.
pub trait RosterSource: Send + Sync {
    fn lookup(&self, tournament_id: &str) -> Result<TournamentRecord, StoreError>;
}
