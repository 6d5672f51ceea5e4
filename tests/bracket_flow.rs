//! Integration tests for bracket progression: pairing, advancement, byes and projections.

use race_bracket::{
    bracket_status, bracket_text, match_history, next_contests, start_bracket, submit_result,
    Bracket, BracketError, ParticipantId, ParticipantStatus,
};

fn names(list: &[&str]) -> Vec<ParticipantId> {
    list.iter().map(|s| s.to_string()).collect()
}

fn bracket_of(list: &[&str]) -> Bracket {
    start_bracket("spring-cup", names(list)).unwrap()
}

#[test]
fn construction_requires_two_participants() {
    assert!(matches!(
        start_bracket("t", Vec::new()),
        Err(BracketError::InvalidRoster { count: 0 })
    ));
    let b = bracket_of(&["A", "B"]);
    assert_eq!(b.total_rounds, 1);
    assert_eq!(b.current_round, 1);
    assert_eq!(next_contests(&b).len(), 1);
}

#[test]
fn four_player_bracket_plays_through() {
    let mut b = bracket_of(&["A", "B", "C", "D"]);
    assert_eq!(b.total_rounds, 2);

    submit_result(&mut b, "match_1", &names(&["A", "B"]), &[150_000, 120_000]).unwrap();
    assert_eq!(b.contests[0].winner.as_deref(), Some("B"));
    assert_eq!(b.status_of("A"), Some(ParticipantStatus::Eliminated));

    submit_result(&mut b, "match_2", &names(&["C", "D"]), &[120_000, 150_000]).unwrap();
    assert_eq!(b.status_of("D"), Some(ParticipantStatus::Eliminated));

    let next = next_contests(&b);
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].entrants, vec!["B", "C"]);
    assert_eq!(next[0].round, 2);
    assert_eq!(b.rounds[0].advancing, vec!["B", "C"]);

    let out = submit_result(&mut b, "match_3", &names(&["B", "C"]), &[135_000, 120_000]).unwrap();
    assert!(out.tournament_complete);
    assert!(b.is_complete);
    assert_eq!(b.winner.as_deref(), Some("C"));
    assert_eq!(b.status_of("C"), Some(ParticipantStatus::Winner));
    assert!(next_contests(&b).is_empty());
    assert_eq!(match_history(&b).len(), 3);

    // Completion is permanent: nothing left to submit.
    assert!(matches!(
        submit_result(&mut b, "match_3", &names(&["B", "C"]), &[1, 2]),
        Err(BracketError::AlreadyFinished(_))
    ));
    assert!(b.is_complete);
}

#[test]
fn winners_advance_in_contest_order_even_when_submitted_out_of_order() {
    let mut b = bracket_of(&["A", "B", "C", "D"]);
    submit_result(&mut b, "match_2", &names(&["C", "D"]), &[1, 2]).unwrap();
    submit_result(&mut b, "match_1", &names(&["A", "B"]), &[1, 2]).unwrap();
    assert_eq!(next_contests(&b)[0].entrants, vec!["A", "C"]);
}

#[test]
fn six_player_bracket_carries_bye_through_round_two() {
    // Round 1: A-B, C-D, E-F. Round 2: three winners, last one gets a bye.
    let mut b = bracket_of(&["A", "B", "C", "D", "E", "F"]);
    assert_eq!(b.total_rounds, 3);
    for (id, pair) in [("match_1", ["A", "B"]), ("match_2", ["C", "D"]), ("match_3", ["E", "F"])] {
        submit_result(&mut b, id, &names(&pair), &[10, 20]).unwrap();
    }

    assert_eq!(b.current_round, 2);
    let status = bracket_status(&b);
    assert_eq!(status.bye_participants, vec!["E"]);
    assert_eq!(status.next_contests.len(), 1);
    assert_eq!(status.next_contests[0].entrants, vec!["A", "C"]);

    submit_result(&mut b, "match_4", &names(&["A", "C"]), &[30, 20]).unwrap();
    assert_eq!(b.current_round, 3);
    assert_eq!(b.rounds[1].advancing, vec!["C", "E"]);
    assert_eq!(b.status_of("E"), Some(ParticipantStatus::Active));
    assert_eq!(next_contests(&b)[0].entrants, vec!["C", "E"]);

    submit_result(&mut b, "match_5", &names(&["E", "C"]), &[5, 5]).unwrap();
    assert_eq!(b.winner.as_deref(), Some("E"));
    assert_eq!(b.current_round, b.total_rounds);
}

#[test]
fn bracket_text_lists_rounds_through_current() {
    let mut b = bracket_of(&["A", "B", "C", "D", "E"]);
    submit_result(&mut b, "match_1", &names(&["A", "B"]), &[1, 2]).unwrap();

    let text = bracket_text(&b);
    assert!(text.starts_with("Tournament: spring-cup\nCurrent Round: 1/3\nStatus: IN PROGRESS\n"));
    assert!(text.contains("=== Round 1 ===\n  A vs B - WINNER: A\n  C vs D - PENDING\n  E - BYE\n"));
    assert!(!text.contains("=== Round 2 ==="));
}
