//! Data structures for the bracket: participants, contests, bracket state.

mod bracket;
mod contest;
mod participant;

pub use bracket::{Bracket, BracketError, TournamentFormat, TournamentId};
pub use contest::{contest_id, Contest, ContestId, RoundRecord};
pub use participant::{ParticipantId, ParticipantStatus};
