//! Tournament CLI.
//!
//! Plays repeated matches of the same lineup in parallel and prints
//! aggregated wins and mean normalized scores per lineup slot.
//!
//! Usage:
//!   cargo run --release --bin tournament -- --map FILE [OPTIONS]
//!
//! Options:
//!   --map FILE       Path to a JSON-encoded map (required)
//!   --games N        Number of matches to play (default: 10)
//!   --bots LIST      Comma-separated strategies (default: baseline,baseline)
//!   --settings LIST  Comma-separated extensions: futures,splurges
//!   --threads N      Worker threads (default: 4)
//!   --no-rotate      Keep the same seating every game

use std::env;
use std::fs;
use std::process;

use riverclaim::protocol::{MapDef, Settings};
use riverclaim::punter::Strategy;
use riverclaim::tournament::{run_tournament, TournamentConfig};

fn print_usage() {
    eprintln!(
        "Usage: tournament --map FILE [--games N] [--bots LIST] [--settings LIST] [--threads N] [--no-rotate]"
    );
}

fn parse_bots(spec: &str) -> Result<Vec<Strategy>, String> {
    spec.split(',')
        .map(|name| name.parse::<Strategy>().map_err(|e| e.to_string()))
        .collect()
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = TournamentConfig::default();
    let mut map_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--map" => {
                i += 1;
                map_path = Some(args[i].clone());
            }
            "--games" => {
                i += 1;
                config.games = args[i].parse().expect("invalid --games value");
            }
            "--bots" => {
                i += 1;
                config.strategies = parse_bots(&args[i]).unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
            }
            "--settings" => {
                i += 1;
                config.settings = args[i].parse::<Settings>().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--no-rotate" => {
                config.rotate = false;
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

    let map_path = map_path.unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let data = fs::read_to_string(&map_path).unwrap_or_else(|e| {
        eprintln!("Can't read map file {}: {}", map_path, e);
        process::exit(1);
    });
    let map = MapDef::from_json(&data).unwrap_or_else(|e| {
        eprintln!("Can't parse map {}: {}", map_path, e);
        process::exit(1);
    });

    eprintln!(
        "Tournament: {} games, {} bots, settings {}, {} threads",
        config.games,
        config.strategies.len(),
        config.settings,
        config.threads
    );

    let summary = run_tournament(&map, &config).unwrap_or_else(|e| {
        eprintln!("Tournament failed: {}", e);
        process::exit(1);
    });

    println!("Games played: {}", summary.games);
    for (slot, strategy) in summary.strategies.iter().enumerate() {
        println!(
            "Slot {} {:<9} wins: {:>4}  mean score: {:.2}%",
            slot,
            strategy.name(),
            summary.wins[slot],
            summary.mean_normalized[slot]
        );
    }
}
