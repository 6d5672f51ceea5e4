//! Result ranking: order a contest's times into finishing positions.

use crate::models::ParticipantId;
use serde::{Deserialize, Serialize};

/// One participant's finishing position in a contest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub participant: ParticipantId,
    pub elapsed_ms: u64,
    /// 1-based. Tied times share a position and the next position is skipped (1, 1, 3).
    pub position: usize,
}

/// Rank entries by ascending elapsed time using competition ranking.
///
/// The sort is stable, so among equal times the input order is kept. The first
/// entry of the output is therefore the fastest participant listed earliest.
pub fn rank_results<I, P>(entries: I) -> Vec<RankedResult>
where
    I: IntoIterator<Item = (P, u64)>,
    P: Into<ParticipantId>,
{
    let mut sorted: Vec<(ParticipantId, u64)> = entries
        .into_iter()
        .map(|(p, t)| (p.into(), t))
        .collect();
    sorted.sort_by_key(|(_, t)| *t);

    let mut ranked: Vec<RankedResult> = Vec::with_capacity(sorted.len());
    for (i, (participant, elapsed_ms)) in sorted.into_iter().enumerate() {
        let position = match ranked.last() {
            Some(prev) if prev.elapsed_ms == elapsed_ms => prev.position,
            _ => i + 1,
        };
        ranked.push(RankedResult {
            participant,
            elapsed_ms,
            position,
        });
    }
    ranked
}
