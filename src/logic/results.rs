//! Contest results: validate, pick the winner, eliminate the rest, advance rounds.

use crate::logic::pairing::{next_round_pool, pair_round};
use crate::logic::ranking::rank_results;
use crate::models::{Bracket, BracketError, ContestId, ParticipantId, ParticipantStatus};
use serde::Serialize;
use std::collections::HashSet;

/// What a successful submission changed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub contest_id: ContestId,
    pub winner: ParticipantId,
    pub eliminated: Vec<ParticipantId>,
    /// The submission finished its round (and either paired the next one or completed the bracket).
    pub round_complete: bool,
    pub tournament_complete: bool,
}

/// Index of a contest that can still take a result.
pub fn find_open_contest(bracket: &Bracket, contest_id: &str) -> Result<usize, BracketError> {
    let idx = bracket
        .contests
        .iter()
        .position(|c| c.id == contest_id)
        .ok_or_else(|| BracketError::ContestNotFound(contest_id.to_string()))?;
    if bracket.contests[idx].finished {
        return Err(BracketError::AlreadyFinished(contest_id.to_string()));
    }
    Ok(idx)
}

/// Check a result against the bracket without changing it. Returns the contest's index.
///
/// Fails if the contest is unknown or finished, if `participants` and `times` differ in
/// length, if nothing was submitted, or if a name is repeated or is not an entrant.
pub fn check_result(
    bracket: &Bracket,
    contest_id: &str,
    participants: &[ParticipantId],
    times: &[u64],
) -> Result<usize, BracketError> {
    let idx = find_open_contest(bracket, contest_id)?;
    let contest = &bracket.contests[idx];
    if participants.len() != times.len() {
        return Err(BracketError::LengthMismatch {
            participants: participants.len(),
            times: times.len(),
        });
    }
    if participants.is_empty() {
        return Err(BracketError::EmptyResult(contest.id.clone()));
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if !contest.has_entrant(p) {
            return Err(BracketError::NotAnEntrant {
                contest: contest.id.clone(),
                participant: p.clone(),
            });
        }
        if !seen.insert(p.as_str()) {
            return Err(BracketError::DuplicateEntry {
                contest: contest.id.clone(),
                participant: p.clone(),
            });
        }
    }
    Ok(idx)
}

/// Record a contest result and advance the bracket when the round is done.
///
/// The winner is the fastest time; on an exact tie the participant listed first wins.
/// Every other entrant of the contest is eliminated, including entrants missing from
/// `participants` (they did not finish).
pub fn submit_result(
    bracket: &mut Bracket,
    contest_id: &str,
    participants: &[ParticipantId],
    times: &[u64],
) -> Result<SubmitOutcome, BracketError> {
    let idx = check_result(bracket, contest_id, participants, times)?;

    let ranked = rank_results(participants.iter().cloned().zip(times.iter().copied()));
    let winner = match ranked.first() {
        Some(r) => r.participant.clone(),
        None => return Err(BracketError::EmptyResult(contest_id.to_string())),
    };

    let eliminated: Vec<ParticipantId> = bracket.contests[idx]
        .entrants
        .iter()
        .filter(|e| **e != winner)
        .cloned()
        .collect();
    for p in &eliminated {
        bracket.set_status(p, ParticipantStatus::Eliminated);
    }
    bracket.contests[idx].finish(winner.clone());
    log::info!(
        "Contest {} of {} won by {} (eliminated: {:?})",
        contest_id,
        bracket.tournament_id,
        winner,
        eliminated
    );

    let round_complete = is_round_complete(bracket);
    if round_complete {
        advance_round(bracket);
    }

    Ok(SubmitOutcome {
        contest_id: bracket.contests[idx].id.clone(),
        winner,
        eliminated,
        round_complete,
        tournament_complete: bracket.is_complete,
    })
}

/// Every contest of the current round is finished.
pub fn is_round_complete(bracket: &Bracket) -> bool {
    bracket
        .contests_in_round(bracket.current_round)
        .all(|c| c.finished)
}

/// Close the current round: record who advances, then either crown a winner or pair the next round.
fn advance_round(bracket: &mut Bracket) {
    let round = bracket.current_round;
    let mut advancing: Vec<ParticipantId> = bracket
        .contests_in_round(round)
        .filter_map(|c| c.winner.clone())
        .collect();
    advancing.extend(bracket.pending_byes.drain(..));

    if let Some(record) = bracket.rounds.iter_mut().find(|r| r.round == round) {
        record.advancing = advancing.clone();
    }

    if let [winner] = advancing.as_slice() {
        bracket.set_status(winner, ParticipantStatus::Winner);
        bracket.winner = Some(winner.clone());
        bracket.is_complete = true;
        log::info!("Tournament {} complete, winner {}", bracket.tournament_id, winner);
        return;
    }

    bracket.current_round += 1;
    if bracket.current_round > bracket.total_rounds {
        log::warn!(
            "Tournament {} exceeded expected rounds: round {} of {}",
            bracket.tournament_id,
            bracket.current_round,
            bracket.total_rounds
        );
    }
    log::info!(
        "Tournament {} advancing to round {} with {} participants",
        bracket.tournament_id,
        bracket.current_round,
        advancing.len()
    );

    let pool = next_round_pool(bracket, &advancing);
    pair_round(bracket, pool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::start_bracket;

    fn names(list: &[&str]) -> Vec<ParticipantId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tie_goes_to_first_listed() {
        let mut b = start_bracket("t", names(&["A", "B", "C", "D"])).unwrap();
        let out = submit_result(&mut b, "match_1", &names(&["A", "B"]), &[100, 100]).unwrap();
        assert_eq!(out.winner, "A");
        assert_eq!(out.eliminated, vec!["B"]);
        assert_eq!(b.status_of("B"), Some(ParticipantStatus::Eliminated));

        let out = submit_result(&mut b, "match_2", &names(&["D", "C"]), &[100, 100]).unwrap();
        assert_eq!(out.winner, "D");
    }

    #[test]
    fn validation_errors_leave_bracket_untouched() {
        let mut b = start_bracket("t", names(&["A", "B", "C", "D"])).unwrap();
        let abc = names(&["A", "B"]);

        assert_eq!(
            submit_result(&mut b, "match_9", &abc, &[1, 2]).unwrap_err(),
            BracketError::ContestNotFound("match_9".into())
        );
        assert_eq!(
            submit_result(&mut b, "match_1", &abc, &[1]).unwrap_err(),
            BracketError::LengthMismatch { participants: 2, times: 1 }
        );
        assert_eq!(
            submit_result(&mut b, "match_1", &[], &[]).unwrap_err(),
            BracketError::EmptyResult("match_1".into())
        );
        assert!(matches!(
            submit_result(&mut b, "match_1", &names(&["A", "C"]), &[1, 2]),
            Err(BracketError::NotAnEntrant { .. })
        ));
        assert!(matches!(
            submit_result(&mut b, "match_1", &names(&["A", "A"]), &[1, 2]),
            Err(BracketError::DuplicateEntry { .. })
        ));
        assert!(b.contests.iter().all(|c| !c.finished));
        assert_eq!(b.participants_with(ParticipantStatus::Active).len(), 4);

        submit_result(&mut b, "match_1", &abc, &[1, 2]).unwrap();
        assert_eq!(
            submit_result(&mut b, "match_1", &abc, &[1, 2]).unwrap_err(),
            BracketError::AlreadyFinished("match_1".into())
        );
    }

    #[test]
    fn unnamed_entrant_is_eliminated_as_non_finisher() {
        let mut b = start_bracket("t", names(&["A", "B"])).unwrap();
        let out = submit_result(&mut b, "match_1", &names(&["B"]), &[5000]).unwrap();
        assert_eq!(out.winner, "B");
        assert_eq!(out.eliminated, vec!["A"]);
        assert!(out.tournament_complete);
        assert_eq!(b.winner.as_deref(), Some("B"));
    }

    #[test]
    fn bye_rejoins_next_round_after_winners() {
        let mut b = start_bracket("t", names(&["A", "B", "C"])).unwrap();
        assert_eq!(b.status_of("C"), Some(ParticipantStatus::Bye));

        let out = submit_result(&mut b, "match_1", &names(&["A", "B"]), &[200, 100]).unwrap();
        assert!(out.round_complete);
        assert!(!out.tournament_complete);
        assert_eq!(b.current_round, 2);
        assert_eq!(b.rounds[0].advancing, vec!["B", "C"]);
        assert_eq!(b.status_of("C"), Some(ParticipantStatus::Active));
        assert!(b.pending_byes.is_empty());

        let next: Vec<_> = b.contests_in_round(2).collect();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].entrants, vec!["B", "C"]);
    }
}
