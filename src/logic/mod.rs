//! Bracket business logic: setup, pairing, ranking, results, projections.

mod pairing;
mod projections;
mod ranking;
mod results;
mod setup;
mod time;

pub use projections::{bracket_status, bracket_text, match_history, next_contests, BracketStatus};
pub use ranking::{rank_results, RankedResult};
pub use results::{
    check_result, find_open_contest, is_round_complete, submit_result, SubmitOutcome,
};
pub use setup::{start_bracket, total_rounds_for};
pub use time::{parse_time, TimeParseError};
