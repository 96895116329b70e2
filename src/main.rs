//! Wordcup -- simulated tournament driver.
//!
//! Runs a full single-elimination tournament with scripted random turn
//! outcomes standing in for the interactive word-guessing mini-game.
//! Progress goes to stderr; the final bracket report can be printed as
//! JSON to stdout.
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --roster FILE   Roster JSON: an array of {"name", "players"} teams
//!   --policy MODE   Turn order: sequential | alternating (default: sequential)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --json          Print the final bracket report as JSON to stdout
//!   --quiet         Suppress per-turn progress output

use std::env;
use std::fs;
use std::process;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use wordcup::progression::{Progress, Tournament, TurnEvent, TurnOutcome};
use wordcup::report::{BracketReport, MatchReport};
use wordcup::roster::{Roster, Team};
use wordcup::sequencer::TurnPolicy;

/// Word pool for simulated turns.
const WORDS: [&str; 24] = [
    "anchor", "basket", "candle", "dragon", "engine", "forest", "guitar", "hammer", "island",
    "jacket", "kettle", "ladder", "magnet", "needle", "orange", "pillow", "quarry", "rocket",
    "saddle", "tunnel", "umpire", "violin", "walnut", "yonder",
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut roster_path: Option<String> = None;
    let mut policy = TurnPolicy::Sequential;
    let mut seed: u64 = 0;
    let mut json = false;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--roster" => {
                i += 1;
                roster_path = Some(args[i].clone());
            }
            "--policy" => {
                i += 1;
                policy = match args[i].as_str() {
                    "sequential" => TurnPolicy::Sequential,
                    "alternating" => TurnPolicy::Alternating,
                    other => {
                        eprintln!("Unknown policy: {}", other);
                        process::exit(1);
                    }
                };
            }
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("invalid --seed value");
            }
            "--json" => {
                json = true;
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let roster = match &roster_path {
        Some(path) => load_roster(path),
        None => demo_roster(),
    };

    let result = if seed == 0 {
        Tournament::new(roster, policy)
    } else {
        Tournament::seeded(roster, policy, seed)
    };
    let mut tournament = match result {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    // Separate RNG for the scripted mini-game so engine tie-break draws
    // stay reproducible for a given seed.
    let mut rng = if seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(seed.wrapping_add(1))
    };

    let champion = run_tournament(&mut tournament, &mut rng, quiet);
    eprintln!("Champion: {}", tournament.teams()[champion].name);

    if json {
        let report = BracketReport::new(&tournament);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("failed to serialize bracket report")
        );
    }
}

/// Plays every match to completion with random turn outcomes and
/// returns the champion's roster index.
fn run_tournament(tournament: &mut Tournament, rng: &mut SmallRng, quiet: bool) -> usize {
    loop {
        let mut up = match tournament.start_match() {
            Ok(player) => player,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        };
        announce_match(tournament, quiet);

        loop {
            let outcome = simulate_turn(rng);
            if !quiet {
                eprintln!(
                    "  {} (side {}) scores {}",
                    up.player_name, up.team_slot, outcome.score
                );
            }
            match tournament.record_turn(outcome) {
                Ok(TurnEvent::NextTurn(player)) => up = player,
                Ok(TurnEvent::OvertimeStarted(player)) => {
                    if !quiet {
                        eprintln!("  tie game: overtime, {} to start", player.player_name);
                    }
                    up = player;
                }
                Ok(TurnEvent::Decided { .. }) => {
                    if !quiet {
                        if let Some(report) = MatchReport::for_current_match(tournament) {
                            eprintln!("{}", report.to_text());
                        }
                    }
                    break;
                }
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }

        match tournament.advance_match() {
            Ok(Progress::NextMatch(_)) => continue,
            Ok(Progress::Champion(champion)) => return champion,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }
}

/// One scripted mini-game turn: a handful of guessed words, a couple of
/// skips, one point per correct word.
fn simulate_turn(rng: &mut SmallRng) -> TurnOutcome {
    let correct_count = rng.gen_range(0..=6);
    let skipped_count = rng.gen_range(0..=2);
    let mut draw = || WORDS[rng.gen_range(0..WORDS.len())].to_string();
    let correct_words: Vec<String> = (0..correct_count).map(|_| draw()).collect();
    let skipped_words: Vec<String> = (0..skipped_count).map(|_| draw()).collect();
    TurnOutcome {
        score: correct_words.len() as u32,
        correct_words,
        skipped_words,
    }
}

fn announce_match(tournament: &Tournament, quiet: bool) {
    if quiet {
        return;
    }
    let index = tournament.current_match_index();
    let side = |team: Option<usize>| match team {
        Some(i) => tournament.teams()[i].name.clone(),
        None => "TBD".to_string(),
    };
    if let Some(pair) = tournament.pairing(index) {
        let round = tournament.matches()[index].round;
        eprintln!(
            "Match {} (round {}): {} vs {}",
            index + 1,
            round,
            side(pair[0]),
            side(pair[1])
        );
    }
}

/// Reads and validates a roster from a JSON file.
fn load_roster(path: &str) -> Roster {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("failed to read {}: {}", path, e);
        process::exit(1);
    });
    let teams: Vec<Team> = serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("failed to parse {}: {}", path, e);
        process::exit(1);
    });
    Roster::from_teams(teams).unwrap_or_else(|e| {
        eprintln!("invalid roster: {}", e);
        process::exit(1);
    })
}

/// Built-in four-team roster used when no file is given.
fn demo_roster() -> Roster {
    let mut roster = Roster::new();
    let teams: [(&str, &[&str]); 4] = [
        ("Red Foxes", &["Ann", "Ben", "Carla"]),
        ("Blue Owls", &["Dmitri", "Elena"]),
        ("Green Bears", &["Farid", "Grace", "Hugo", "Ines"]),
        ("Gold Hawks", &["Jonas", "Katya"]),
    ];
    for (name, players) in teams {
        let players: Vec<String> = players.iter().map(|p| p.to_string()).collect();
        roster.add_team(name, &players).expect("demo roster is valid");
    }
    roster
}

fn print_usage() {
    eprintln!("Usage: wordcup [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --roster FILE   Roster JSON: an array of {{\"name\", \"players\"}} teams");
    eprintln!("  --policy MODE   Turn order: sequential | alternating (default: sequential)");
    eprintln!("  --seed N        Random seed, 0 for entropy (default: 0)");
    eprintln!("  --json          Print the final bracket report as JSON to stdout");
    eprintln!("  --quiet         Suppress per-turn progress output");
    eprintln!("  --help          Show this help");
}
