//! Line-driven front end for the registry, backed by the CSV store.
//! Run with: cargo run --bin bracket
//! Reads commands from stdin, one per line; responses go to stdout as JSON or text.
//! Data directory comes from BRACKET_DATA_DIR (default `data`).
//!
//! Commands:
//!   start <tournament>
//!   result <tournament> <contest> <participant>=<MM:SS.F> ...
//!   status <tournament> | next <tournament> | history <tournament> | bracket <tournament>
//!   stop <tournament> | list | quit

use race_bracket::{Config, CsvStore, ParticipantId, RegistryError, TournamentRegistry};
use serde_json::json;
use std::io::{self, BufRead};
use std::sync::Arc;

#[derive(Debug, Eq, PartialEq)]
enum Command {
    Start(String),
    Result {
        tournament: String,
        contest: String,
        participants: Vec<ParticipantId>,
        times: Vec<String>,
    },
    Status(String),
    Next(String),
    History(String),
    Bracket(String),
    Stop(String),
    List,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or("empty command")?;
    let mut tournament = || {
        words
            .next()
            .map(str::to_string)
            .ok_or_else(|| format!("{verb}: missing tournament id"))
    };
    let cmd = match verb {
        "start" => Command::Start(tournament()?),
        "status" => Command::Status(tournament()?),
        "next" => Command::Next(tournament()?),
        "history" => Command::History(tournament()?),
        "bracket" => Command::Bracket(tournament()?),
        "stop" => Command::Stop(tournament()?),
        "list" => return Ok(Command::List),
        "quit" | "exit" => return Ok(Command::Quit),
        "result" => {
            let tournament = tournament()?;
            let contest = words.next().ok_or("result: missing contest id")?.to_string();
            let mut participants = Vec::new();
            let mut times = Vec::new();
            for entry in words {
                let (p, t) = entry
                    .split_once('=')
                    .ok_or_else(|| format!("result: expected participant=time, got {entry:?}"))?;
                participants.push(p.to_string());
                times.push(t.to_string());
            }
            return Ok(Command::Result {
                tournament,
                contest,
                participants,
                times,
            });
        }
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(cmd)
}

fn error_json(e: &RegistryError) -> String {
    json!({ "error": e.to_string(), "kind": format!("{:?}", e.kind()) }).to_string()
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
}

/// Run one command. Returns false when the session should end.
fn execute(registry: &TournamentRegistry, cmd: Command) -> bool {
    let out = match cmd {
        Command::Quit => return false,
        Command::List => to_json(&registry.list_active()),
        Command::Start(id) => match registry.start(&id) {
            Ok(()) => json!({ "message": "Tournament started", "tournament_id": id }).to_string(),
            Err(e) => error_json(&e),
        },
        Command::Result {
            tournament,
            contest,
            participants,
            times,
        } => match registry.submit_result(&tournament, &contest, &participants, times.as_slice()) {
            Ok(outcome) => to_json(&outcome),
            Err(e) => error_json(&e),
        },
        Command::Status(id) => registry.status(&id).map_or_else(|e| error_json(&e), |s| to_json(&s)),
        Command::Next(id) => registry
            .next_contests(&id)
            .map_or_else(|e| error_json(&e), |c| to_json(&c)),
        Command::History(id) => registry
            .match_history(&id)
            .map_or_else(|e| error_json(&e), |c| to_json(&c)),
        Command::Bracket(id) => registry.bracket_text(&id).unwrap_or_else(|e| error_json(&e)),
        Command::Stop(id) => match registry.stop(&id) {
            Ok(()) => json!({ "message": "Tournament stopped", "tournament_id": id }).to_string(),
            Err(e) => error_json(&e),
        },
    };
    println!("{out}");
    true
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store = Arc::new(CsvStore::open(&config.data_dir)?);
    log::info!("Using data directory {}", config.data_dir.display());
    let registry = TournamentRegistry::new(store.clone(), store);

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(cmd) => {
                if !execute(&registry, cmd) {
                    break;
                }
            }
            Err(msg) => println!("{}", json!({ "error": msg })),
        }
    }
    Ok(())
}
