//! Round generation: turn the advancing pool into 2-entrant contests.

use crate::models::{contest_id, Bracket, Contest, ParticipantId, ParticipantStatus, RoundRecord};

/// Pair `pool` into contests for `bracket.current_round`.
///
/// 1. If the pool is odd, the last participant gets a bye for this round.
/// 2. The rest are paired in order: (0, 1), (2, 3), ...
///
/// Pushes a fresh `RoundRecord` for the round.
pub(crate) fn pair_round(bracket: &mut Bracket, mut pool: Vec<ParticipantId>) {
    let round = bracket.current_round;
    log::debug!(
        "Pairing round {} of {} with {} participants",
        round,
        bracket.tournament_id,
        pool.len()
    );

    let mut record = RoundRecord::new(round);
    if pool.len() % 2 == 1 {
        if let Some(bye) = pool.pop() {
            log::debug!("{} gets a bye in round {}", bye, round);
            bracket.set_status(&bye, ParticipantStatus::Bye);
            bracket.pending_byes.push(bye.clone());
            record.bye = Some(bye);
        }
    }

    for pair in pool.chunks_exact(2) {
        let id = contest_id(bracket.next_contest_seq);
        bracket.next_contest_seq += 1;
        log::debug!("Created {}: {} vs {}", id, pair[0], pair[1]);
        bracket.contests.push(Contest::new(id, round, pair.to_vec()));
    }
    bracket.rounds.push(record);
}

/// Pool for the next round: the finished round's advancing list, with byes restored to Active.
///
/// `advancing` already holds the returning byes (drained from `pending_byes`), so they are
/// not appended a second time.
pub(crate) fn next_round_pool(bracket: &mut Bracket, advancing: &[ParticipantId]) -> Vec<ParticipantId> {
    for p in advancing {
        if bracket.status_of(p) == Some(ParticipantStatus::Bye) {
            bracket.set_status(p, ParticipantStatus::Active);
        }
    }
    advancing.to_vec()
}
