//! Contest (one scheduled race) and per-round records.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Identifier for a contest, e.g. `match_3`. Assigned in creation order.
pub type ContestId = String;

/// Build the id for the `seq`-th contest of a bracket.
pub fn contest_id(seq: u64) -> ContestId {
    format!("match_{seq}")
}

/// A single race among two or more entrants. The fastest time wins.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: ContestId,
    pub round: u32,
    /// Entrants in pairing order. Always at least two.
    pub entrants: Vec<ParticipantId>,
    /// None until the contest is finished.
    pub winner: Option<ParticipantId>,
    pub finished: bool,
}

impl Contest {
    pub fn new(id: ContestId, round: u32, entrants: Vec<ParticipantId>) -> Self {
        debug_assert!(entrants.len() >= 2);
        Self {
            id,
            round,
            entrants,
            winner: None,
            finished: false,
        }
    }

    pub fn has_entrant(&self, participant: &str) -> bool {
        self.entrants.iter().any(|e| e == participant)
    }

    /// Mark finished with the given winner.
    pub fn finish(&mut self, winner: ParticipantId) {
        self.winner = Some(winner);
        self.finished = true;
    }
}

/// One round of the bracket: who sat out and who came out of it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    /// Participant given a bye when the round was paired.
    pub bye: Option<ParticipantId>,
    /// Contest winners (contest order) followed by returning byes. Filled when the round completes.
    pub advancing: Vec<ParticipantId>,
}

impl RoundRecord {
    pub fn new(round: u32) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }
}
