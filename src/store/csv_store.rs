//! CSV-file store: a directory holding the catalogue and append-only result logs.
//!
//! Layout:
//! - `tournaments.csv`: `id,name,format`
//! - `participants.csv`: `tournament_id,participant` (row order is seeding order)
//! - `results.csv`: one `ResultRow` per line, appended; on a retried submission the
//!   last row for a (tournament, contest, participant) is the one that counts
//! - `completions.csv`: one `CompletionSummary` per line, appended

use super::{CompletionSummary, ResultRow, ResultStore, RosterSource, StoreError, TournamentRecord};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const TOURNAMENTS_FILE: &str = "tournaments.csv";
const PARTICIPANTS_FILE: &str = "participants.csv";
const RESULTS_FILE: &str = "results.csv";
const COMPLETIONS_FILE: &str = "completions.csv";

#[derive(Deserialize)]
struct TournamentRow {
    id: String,
    format: String,
}

#[derive(Deserialize)]
struct ParticipantRow {
    tournament_id: String,
    participant: String,
}

pub struct CsvStore {
    dir: PathBuf,
    /// Serializes appends so header detection and the write stay together.
    write_lock: Mutex<()>,
}

impl CsvStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn append<T: Serialize>(&self, file: &str, row: &T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let path = self.dir.join(file);
        let needs_header = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let f = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(f);
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }
}

impl ResultStore for CsvStore {
    fn record_result(&self, row: &ResultRow) -> Result<(), StoreError> {
        self.append(RESULTS_FILE, row)
    }

    fn record_completion(&self, summary: &CompletionSummary) -> Result<(), StoreError> {
        self.append(COMPLETIONS_FILE, summary)
    }
}

impl RosterSource for CsvStore {
    fn lookup(&self, tournament_id: &str) -> Result<TournamentRecord, StoreError> {
        let mut tournaments = csv::Reader::from_path(self.dir.join(TOURNAMENTS_FILE))?;
        let mut format = None;
        for row in tournaments.deserialize::<TournamentRow>() {
            let row = row?;
            if row.id == tournament_id {
                format = Some(row.format);
                break;
            }
        }
        let format = format.ok_or_else(|| StoreError::TournamentNotFound(tournament_id.to_string()))?;

        let mut participants = csv::Reader::from_path(self.dir.join(PARTICIPANTS_FILE))?;
        let mut roster = Vec::new();
        for row in participants.deserialize::<ParticipantRow>() {
            let row = row?;
            if row.tournament_id == tournament_id {
                roster.push(row.participant);
            }
        }
        log::debug!(
            "Loaded {} participants for {} from {}",
            roster.len(),
            tournament_id,
            self.dir.display()
        );

        Ok(TournamentRecord {
            id: tournament_id.to_string(),
            format,
            roster,
        })
    }
}
