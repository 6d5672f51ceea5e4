//! Bracket state for one running tournament, and the engine's error type.

use crate::models::contest::{Contest, ContestId, RoundRecord};
use crate::models::participant::{ParticipantId, ParticipantStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by the bracket engine.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BracketError {
    /// Fewer than two participants.
    #[error("a bracket needs at least 2 participants, got {count}")]
    InvalidRoster { count: usize },
    #[error("participant {0} appears more than once in the roster")]
    DuplicateParticipant(ParticipantId),
    #[error("contest not found: {0}")]
    ContestNotFound(ContestId),
    #[error("contest already finished: {0}")]
    AlreadyFinished(ContestId),
    #[error("got {participants} participants but {times} times")]
    LengthMismatch { participants: usize, times: usize },
    #[error("no results given for contest {0}")]
    EmptyResult(ContestId),
    #[error("{participant} is not an entrant of contest {contest}")]
    NotAnEntrant {
        contest: ContestId,
        participant: ParticipantId,
    },
    #[error("{participant} is listed more than once for contest {contest}")]
    DuplicateEntry {
        contest: ContestId,
        participant: ParticipantId,
    },
}

/// Identifier for a tournament (assigned by whoever owns the tournament catalogue).
pub type TournamentId = String;

/// Bracket formats known to the tournament catalogue.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    SoloSingleElim,
    DoubleElim,
}

impl TournamentFormat {
    /// Parse the catalogue's format string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "solo_single_elim" => Some(TournamentFormat::SoloSingleElim),
            "double_elim" => Some(TournamentFormat::DoubleElim),
            _ => None,
        }
    }

    /// Only solo single elimination has an engine.
    pub fn is_supported(self) -> bool {
        matches!(self, TournamentFormat::SoloSingleElim)
    }
}

/// Full state of one single-elimination bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bracket {
    pub tournament_id: TournamentId,
    /// Roster in seeding order; fixed at construction.
    pub roster: Vec<ParticipantId>,
    pub statuses: HashMap<ParticipantId, ParticipantStatus>,
    /// Every contest ever scheduled, in creation order.
    pub contests: Vec<Contest>,
    /// Starts at 1, only increases.
    pub current_round: u32,
    pub total_rounds: u32,
    pub is_complete: bool,
    pub winner: Option<ParticipantId>,
    /// Sequence number for the next contest id.
    pub next_contest_seq: u64,
    /// One record per round paired so far (index = round - 1).
    pub rounds: Vec<RoundRecord>,
    /// Participants currently on a bye, in the order they were given one.
    pub pending_byes: Vec<ParticipantId>,
}

impl Bracket {
    /// Empty bracket with every roster participant Active. No contests yet.
    pub(crate) fn new(tournament_id: TournamentId, roster: Vec<ParticipantId>, total_rounds: u32) -> Self {
        let statuses = roster
            .iter()
            .map(|p| (p.clone(), ParticipantStatus::Active))
            .collect();
        Self {
            tournament_id,
            roster,
            statuses,
            contests: Vec::new(),
            current_round: 1,
            total_rounds,
            is_complete: false,
            winner: None,
            next_contest_seq: 1,
            rounds: Vec::new(),
            pending_byes: Vec::new(),
        }
    }

    pub fn status_of(&self, participant: &str) -> Option<ParticipantStatus> {
        self.statuses.get(participant).copied()
    }

    pub(crate) fn set_status(&mut self, participant: &str, status: ParticipantStatus) {
        if let Some(s) = self.statuses.get_mut(participant) {
            *s = status;
        }
    }

    /// Roster participants currently holding `status`, in roster order.
    pub fn participants_with(&self, status: ParticipantStatus) -> Vec<ParticipantId> {
        self.roster
            .iter()
            .filter(|p| self.status_of(p) == Some(status))
            .cloned()
            .collect()
    }

    pub fn contest(&self, id: &str) -> Option<&Contest> {
        self.contests.iter().find(|c| c.id == id)
    }

    /// Contests belonging to `round`, in creation order.
    pub fn contests_in_round(&self, round: u32) -> impl Iterator<Item = &Contest> {
        self.contests.iter().filter(move |c| c.round == round)
    }

    pub fn round_record(&self, round: u32) -> Option<&RoundRecord> {
        self.rounds.iter().find(|r| r.round == round)
    }

    /// Participants not yet eliminated.
    pub fn alive_count(&self) -> usize {
        self.statuses.values().filter(|s| s.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_knows_catalogue_entries() {
        assert_eq!(
            TournamentFormat::parse("solo_single_elim"),
            Some(TournamentFormat::SoloSingleElim)
        );
        assert_eq!(TournamentFormat::parse("double_elim"), Some(TournamentFormat::DoubleElim));
        assert_eq!(TournamentFormat::parse("swiss"), None);
        assert!(!TournamentFormat::DoubleElim.is_supported());
    }

    #[test]
    fn participants_with_keeps_roster_order() {
        let roster: Vec<ParticipantId> = ["c", "a", "b"].iter().map(|s| s.to_string()).collect();
        let mut b = Bracket::new("t".into(), roster, 2);
        b.set_status("a", ParticipantStatus::Eliminated);
        assert_eq!(b.participants_with(ParticipantStatus::Active), vec!["c", "b"]);
        assert_eq!(b.alive_count(), 2);
    }
}
