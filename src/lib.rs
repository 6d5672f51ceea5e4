//! Single-elimination time-trial brackets: engine, ranking, and a concurrent registry.

pub mod config;
pub mod logic;
pub mod models;
pub mod registry;
pub mod store;

pub use config::Config;
pub use logic::{
    bracket_status, bracket_text, check_result, find_open_contest, match_history, next_contests,
    parse_time, rank_results, start_bracket, submit_result, total_rounds_for, BracketStatus,
    RankedResult, SubmitOutcome, TimeParseError,
};
pub use models::{
    Bracket, BracketError, Contest, ContestId, ParticipantId, ParticipantStatus, RoundRecord,
    TournamentFormat, TournamentId,
};
pub use registry::{ErrorKind, RegistryError, RegistryResult, TournamentRegistry};
pub use store::{
    CompletionSummary, CsvStore, MemoryStore, ResultRow, ResultStore, RosterSource, StoreError,
    TournamentRecord,
};
