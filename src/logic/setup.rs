//! Setup: build a bracket from a roster and pair round 1.

use crate::logic::pairing::pair_round;
use crate::models::{Bracket, BracketError, ParticipantId, TournamentId};
use std::collections::HashSet;

/// Number of rounds a single-elimination bracket of `participants` needs: `ceil(log2(n))`.
pub fn total_rounds_for(participants: usize) -> u32 {
    if participants < 2 {
        return 0;
    }
    usize::BITS - (participants - 1).leading_zeros()
}

/// Start a bracket: validate the roster, mark everyone Active and pair round 1.
///
/// The returned bracket always has round-1 contests ready.
pub fn start_bracket(
    tournament_id: impl Into<TournamentId>,
    roster: Vec<ParticipantId>,
) -> Result<Bracket, BracketError> {
    if roster.len() < 2 {
        return Err(BracketError::InvalidRoster { count: roster.len() });
    }
    let mut seen = HashSet::with_capacity(roster.len());
    for p in &roster {
        if !seen.insert(p.as_str()) {
            return Err(BracketError::DuplicateParticipant(p.clone()));
        }
    }

    let total_rounds = total_rounds_for(roster.len());
    let pool = roster.clone();
    let mut bracket = Bracket::new(tournament_id.into(), roster, total_rounds);
    pair_round(&mut bracket, pool);
    Ok(bracket)
}
