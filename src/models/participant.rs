//! Participant identifiers and per-participant bracket status.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a participant, unique within a tournament.
pub type ParticipantId = String;

/// Where a participant stands in the bracket.
///
/// Transitions only move forward, except `Bye -> Active` when a participant
/// re-enters the pairing pool at the start of the next round.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    #[default]
    Active,
    Eliminated,
    /// Sitting out the current round; advances automatically.
    Bye,
    Winner,
}

impl ParticipantStatus {
    /// Still in the running (not eliminated).
    pub fn is_alive(self) -> bool {
        !matches!(self, ParticipantStatus::Eliminated)
    }
}
