//! Read-only views of a bracket: status, upcoming contests, history, text bracket.

use crate::models::{Bracket, Contest, ParticipantId, ParticipantStatus, TournamentId};
use serde::Serialize;

/// Snapshot of a bracket for display or API responses.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketStatus {
    pub tournament_id: TournamentId,
    pub current_round: u32,
    pub total_rounds: u32,
    pub is_complete: bool,
    pub winner: Option<ParticipantId>,
    pub active_participants: Vec<ParticipantId>,
    pub eliminated_participants: Vec<ParticipantId>,
    pub bye_participants: Vec<ParticipantId>,
    pub next_contests: Vec<Contest>,
}

/// Unfinished contests of the current round. Empty once the bracket is complete.
pub fn next_contests(bracket: &Bracket) -> Vec<Contest> {
    if bracket.is_complete {
        return Vec::new();
    }
    bracket
        .contests_in_round(bracket.current_round)
        .filter(|c| !c.finished)
        .cloned()
        .collect()
}

pub fn bracket_status(bracket: &Bracket) -> BracketStatus {
    BracketStatus {
        tournament_id: bracket.tournament_id.clone(),
        current_round: bracket.current_round,
        total_rounds: bracket.total_rounds,
        is_complete: bracket.is_complete,
        winner: bracket.winner.clone(),
        active_participants: bracket.participants_with(ParticipantStatus::Active),
        eliminated_participants: bracket.participants_with(ParticipantStatus::Eliminated),
        bye_participants: bracket.pending_byes.clone(),
        next_contests: next_contests(bracket),
    }
}

/// All finished contests, in creation order.
pub fn match_history(bracket: &Bracket) -> Vec<Contest> {
    bracket.contests.iter().filter(|c| c.finished).cloned().collect()
}

/// Plain-text bracket through the current round.
///
/// ```text
/// Tournament: spring-cup
/// Current Round: 1/2
/// Status: IN PROGRESS
///
/// === Round 1 ===
///   A vs B - WINNER: B
///   C vs D - PENDING
/// ```
pub fn bracket_text(bracket: &Bracket) -> String {
    let mut out = format!("Tournament: {}\n", bracket.tournament_id);
    out.push_str(&format!(
        "Current Round: {}/{}\n",
        bracket.current_round, bracket.total_rounds
    ));
    match (&bracket.winner, bracket.is_complete) {
        (Some(winner), true) => out.push_str(&format!("Status: COMPLETE - Winner: {}\n", winner)),
        _ => out.push_str("Status: IN PROGRESS\n"),
    }
    out.push('\n');

    for round in 1..=bracket.current_round {
        out.push_str(&format!("=== Round {} ===\n", round));
        for contest in bracket.contests_in_round(round) {
            let outcome = match &contest.winner {
                Some(w) if contest.finished => format!("WINNER: {}", w),
                _ => "PENDING".to_string(),
            };
            out.push_str(&format!("  {} - {}\n", contest.entrants.join(" vs "), outcome));
        }
        if let Some(bye) = bracket.round_record(round).and_then(|r| r.bye.as_ref()) {
            out.push_str(&format!("  {} - BYE\n", bye));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{start_bracket, submit_result};

    fn names(list: &[&str]) -> Vec<ParticipantId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn status_lists_participants_by_state() {
        let mut b = start_bracket("cup", names(&["A", "B", "C", "D", "E"])).unwrap();
        submit_result(&mut b, "match_1", &names(&["A", "B"]), &[10, 20]).unwrap();

        let s = bracket_status(&b);
        assert_eq!(s.current_round, 1);
        assert_eq!(s.total_rounds, 3);
        assert_eq!(s.active_participants, vec!["A", "C", "D"]);
        assert_eq!(s.eliminated_participants, vec!["B"]);
        assert_eq!(s.bye_participants, vec!["E"]);
        assert_eq!(s.next_contests.len(), 1);
        assert_eq!(s.next_contests[0].id, "match_2");
        assert_eq!(match_history(&b).len(), 1);
    }

    #[test]
    fn text_shows_each_round_with_its_own_bye() {
        let mut b = start_bracket("cup", names(&["A", "B", "C"])).unwrap();
        submit_result(&mut b, "match_1", &names(&["A", "B"]), &[10, 20]).unwrap();

        let expected = "Tournament: cup\n\
                        Current Round: 2/2\n\
                        Status: IN PROGRESS\n\
                        \n\
                        === Round 1 ===\n  \
                        A vs B - WINNER: A\n  \
                        C - BYE\n\
                        \n\
                        === Round 2 ===\n  \
                        A vs C - PENDING\n\
                        \n";
        assert_eq!(bracket_text(&b), expected);
    }

    #[test]
    fn complete_bracket_has_no_next_contests() {
        let mut b = start_bracket("cup", names(&["A", "B"])).unwrap();
        submit_result(&mut b, "match_1", &names(&["A", "B"]), &[30, 20]).unwrap();
        assert!(next_contests(&b).is_empty());
        assert!(bracket_text(&b).contains("Status: COMPLETE - Winner: B\n"));
    }
}
