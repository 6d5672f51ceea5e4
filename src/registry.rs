//! Registry of running brackets, keyed by tournament id.
//!
//! One `RwLock` guards every bracket. Mutations (`start`, `submit_result`, `stop`)
//! take the write lock for their whole duration, including calls into the
//! result store; reads take the read lock and return owned snapshots.

use crate::logic::{
    bracket_status, bracket_text, check_result, find_open_contest, match_history, next_contests,
    parse_time, rank_results, start_bracket, submit_result, BracketStatus, SubmitOutcome,
    TimeParseError,
};
use crate::models::{
    Bracket, BracketError, Contest, ContestId, ParticipantId, TournamentFormat, TournamentId,
};
use crate::store::{CompletionSummary, ResultRow, ResultStore, RosterSource, StoreError};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Coarse error categories, for callers that map errors onto their own codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    InvalidRoster,
    UnsupportedFormat,
    AlreadyActive,
    NotActive,
    NotFound,
    AlreadyFinished,
    LengthMismatch,
    InvalidResult,
    TimeParse,
    Persistence,
    RosterLookup,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tournament {0} is already active")]
    AlreadyActive(TournamentId),

    #[error("tournament {0} is not active")]
    NotActive(TournamentId),

    #[error("tournament {tournament_id} has unsupported format {format:?}")]
    UnsupportedFormat {
        tournament_id: TournamentId,
        format: String,
    },

    #[error("tournament {tournament_id}: {source}")]
    Bracket {
        tournament_id: TournamentId,
        source: BracketError,
    },

    #[error("tournament {tournament_id}: bad time for {participant}: {source}")]
    TimeParse {
        tournament_id: TournamentId,
        participant: ParticipantId,
        source: TimeParseError,
    },

    #[error("failed to save {contest_id} result for {participant} in {tournament_id}: {source}")]
    Persistence {
        tournament_id: TournamentId,
        contest_id: ContestId,
        participant: ParticipantId,
        source: StoreError,
    },

    #[error("failed to look up tournament {tournament_id}: {source}")]
    RosterLookup {
        tournament_id: TournamentId,
        source: StoreError,
    },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::AlreadyActive(_) => ErrorKind::AlreadyActive,
            RegistryError::NotActive(_) => ErrorKind::NotActive,
            RegistryError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            RegistryError::TimeParse { .. } => ErrorKind::TimeParse,
            RegistryError::Persistence { .. } => ErrorKind::Persistence,
            RegistryError::RosterLookup { .. } => ErrorKind::RosterLookup,
            RegistryError::Bracket { source, .. } => match source {
                BracketError::InvalidRoster { .. } | BracketError::DuplicateParticipant(_) => {
                    ErrorKind::InvalidRoster
                }
                BracketError::ContestNotFound(_) => ErrorKind::NotFound,
                BracketError::AlreadyFinished(_) => ErrorKind::AlreadyFinished,
                BracketError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
                BracketError::EmptyResult(_)
                | BracketError::NotAnEntrant { .. }
                | BracketError::DuplicateEntry { .. } => ErrorKind::InvalidResult,
            },
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// All currently running brackets. Build one at startup and share it (e.g. behind an `Arc`).
pub struct TournamentRegistry {
    active: RwLock<HashMap<TournamentId, Bracket>>,
    results: Arc<dyn ResultStore>,
    rosters: Arc<dyn RosterSource>,
}

impl TournamentRegistry {
    pub fn new(results: Arc<dyn ResultStore>, rosters: Arc<dyn RosterSource>) -> Self {
        Self {
            active: RwLock::new(HashMap::new()),
            results,
            rosters,
        }
    }

    /// Start a tournament from the catalogue: look up its format and roster, then build the bracket.
    pub fn start(&self, tournament_id: &str) -> RegistryResult<()> {
        let mut active = self.active.write();
        if active.contains_key(tournament_id) {
            return Err(RegistryError::AlreadyActive(tournament_id.to_string()));
        }

        let record = self
            .rosters
            .lookup(tournament_id)
            .map_err(|source| RegistryError::RosterLookup {
                tournament_id: tournament_id.to_string(),
                source,
            })?;
        match TournamentFormat::parse(&record.format) {
            Some(format) if format.is_supported() => {}
            _ => {
                return Err(RegistryError::UnsupportedFormat {
                    tournament_id: tournament_id.to_string(),
                    format: record.format,
                })
            }
        }

        let bracket = build_bracket(tournament_id, record.roster)?;
        log::info!(
            "Tournament {} started ({}, {} participants)",
            tournament_id,
            record.format,
            bracket.roster.len()
        );
        active.insert(tournament_id.to_string(), bracket);
        Ok(())
    }

    /// Start a single-elimination bracket with an explicit roster, bypassing the catalogue.
    pub fn start_with_roster(
        &self,
        tournament_id: &str,
        roster: Vec<ParticipantId>,
    ) -> RegistryResult<()> {
        let mut active = self.active.write();
        if active.contains_key(tournament_id) {
            return Err(RegistryError::AlreadyActive(tournament_id.to_string()));
        }
        let bracket = build_bracket(tournament_id, roster)?;
        log::info!(
            "Tournament {} started ({} participants)",
            tournament_id,
            bracket.roster.len()
        );
        active.insert(tournament_id.to_string(), bracket);
        Ok(())
    }

    /// Submit raw `MM:SS.F` times for a contest.
    ///
    /// Order of effects:
    /// 1. Look up the contest (unknown or finished fails first), then check that
    ///    every participant has a time.
    /// 2. Parse every time; any failure aborts with nothing changed.
    /// 3. Validate the entrants against the bracket.
    /// 4. Persist each ranked result; any failure aborts with the bracket unchanged.
    /// 5. Apply the result to the bracket.
    /// 6. If the bracket completed, persist a summary (failure is only logged) and drop it.
    pub fn submit_result<S: AsRef<str>>(
        &self,
        tournament_id: &str,
        contest_id: &str,
        participants: &[ParticipantId],
        raw_times: &[S],
    ) -> RegistryResult<SubmitOutcome> {
        let mut active = self.active.write();
        let bracket = active
            .get_mut(tournament_id)
            .ok_or_else(|| RegistryError::NotActive(tournament_id.to_string()))?;
        let bracket_err = |source| RegistryError::Bracket {
            tournament_id: tournament_id.to_string(),
            source,
        };

        find_open_contest(bracket, contest_id).map_err(bracket_err)?;
        if participants.len() != raw_times.len() {
            return Err(bracket_err(BracketError::LengthMismatch {
                participants: participants.len(),
                times: raw_times.len(),
            }));
        }
        let times = participants
            .iter()
            .zip(raw_times)
            .map(|(participant, raw)| {
                parse_time(raw.as_ref()).map_err(|source| {
                    log::warn!("Rejected time for {} in {}: {}", participant, tournament_id, source);
                    RegistryError::TimeParse {
                        tournament_id: tournament_id.to_string(),
                        participant: participant.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<u64>, _>>()?;

        check_result(bracket, contest_id, participants, &times).map_err(bracket_err)?;

        let ranked = rank_results(participants.iter().cloned().zip(times.iter().copied()));
        for r in &ranked {
            let row = ResultRow {
                tournament_id: tournament_id.to_string(),
                contest_id: contest_id.to_string(),
                participant: r.participant.clone(),
                position: r.position,
                elapsed_ms: r.elapsed_ms,
            };
            self.results
                .record_result(&row)
                .map_err(|source| {
                    log::error!(
                        "Failed to save result of {} for {} in {}: {}",
                        contest_id,
                        r.participant,
                        tournament_id,
                        source
                    );
                    RegistryError::Persistence {
                        tournament_id: tournament_id.to_string(),
                        contest_id: contest_id.to_string(),
                        participant: r.participant.clone(),
                        source,
                    }
                })?;
        }

        let outcome = submit_result(bracket, contest_id, participants, &times).map_err(bracket_err)?;

        if outcome.tournament_complete {
            let summary = CompletionSummary {
                tournament_id: tournament_id.to_string(),
                winner: outcome.winner.clone(),
                total_rounds: bracket.total_rounds,
                contests_played: match_history(bracket).len(),
                completed_at: Utc::now(),
            };
            if let Err(e) = self.results.record_completion(&summary) {
                log::warn!("Failed to save tournament results for {}: {}", tournament_id, e);
            }
            active.remove(tournament_id);
            log::info!("Tournament {} completed, winner {}", tournament_id, outcome.winner);
        }

        Ok(outcome)
    }

    pub fn status(&self, tournament_id: &str) -> RegistryResult<BracketStatus> {
        self.read(tournament_id, bracket_status)
    }

    pub fn next_contests(&self, tournament_id: &str) -> RegistryResult<Vec<Contest>> {
        self.read(tournament_id, next_contests)
    }

    pub fn match_history(&self, tournament_id: &str) -> RegistryResult<Vec<Contest>> {
        self.read(tournament_id, match_history)
    }

    pub fn bracket_text(&self, tournament_id: &str) -> RegistryResult<String> {
        self.read(tournament_id, bracket_text)
    }

    /// Drop a running bracket. Nothing is persisted.
    pub fn stop(&self, tournament_id: &str) -> RegistryResult<()> {
        let mut active = self.active.write();
        if active.remove(tournament_id).is_none() {
            return Err(RegistryError::NotActive(tournament_id.to_string()));
        }
        log::info!("Tournament {} stopped", tournament_id);
        Ok(())
    }

    /// Ids of running tournaments, in no particular order.
    pub fn list_active(&self) -> Vec<TournamentId> {
        self.active.read().keys().cloned().collect()
    }

    pub fn is_active(&self, tournament_id: &str) -> bool {
        self.active.read().contains_key(tournament_id)
    }

    fn read<T>(&self, tournament_id: &str, f: impl FnOnce(&Bracket) -> T) -> RegistryResult<T> {
        let active = self.active.read();
        active
            .get(tournament_id)
            .map(f)
            .ok_or_else(|| RegistryError::NotActive(tournament_id.to_string()))
    }
}

fn build_bracket(tournament_id: &str, roster: Vec<ParticipantId>) -> RegistryResult<Bracket> {
    start_bracket(tournament_id, roster).map_err(|source| RegistryError::Bracket {
        tournament_id: tournament_id.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn registry() -> (TournamentRegistry, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (TournamentRegistry::new(store.clone(), store.clone()), store)
    }

    fn names(list: &[&str]) -> Vec<ParticipantId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn error_kinds_map_engine_errors() {
        let (reg, _) = registry();
        let err = reg.start_with_roster("t", names(&["solo"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRoster);

        reg.start_with_roster("t", names(&["A", "B"])).unwrap();
        let err = reg
            .submit_result("t", "match_7", &names(&["A", "B"]), &["1:00.0", "1:01.0"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = reg
            .submit_result("t", "match_1", &names(&["A", "B"]), &["1:00.0"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
    }

    #[test]
    fn time_parse_failure_names_participant_and_persists_nothing() {
        let (reg, store) = registry();
        reg.start_with_roster("t", names(&["A", "B"])).unwrap();
        let err = reg
            .submit_result("t", "match_1", &names(&["A", "B"]), &["1:00.0", "oops"])
            .unwrap_err();
        match err {
            RegistryError::TimeParse { participant, .. } => assert_eq!(participant, "B"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.results().is_empty());
        assert_eq!(reg.next_contests("t").unwrap().len(), 1);
    }
}
