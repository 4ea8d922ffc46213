//! riverclaim -- standalone match simulator.
//!
//! Loads a JSON map, seats a list of punters by strategy name, plays one
//! full match through the referee, and prints the final score report.
//!
//! Usage:
//!   riverclaim --map FILE [OPTIONS]
//!
//! Options:
//!   --map FILE       Path to a JSON-encoded map (required)
//!   --bots LIST      Comma-separated strategies, `name*N` repeats (default: baseline,baseline)
//!   --settings LIST  Comma-separated extensions: futures,splurges (default: none)
//!   --visfile FILE   Write visualizer log lines to FILE
//!   --quiet          Suppress the per-move log on stderr

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use riverclaim::protocol::{MapDef, Move, Settings};
use riverclaim::punter::Strategy;
use riverclaim::referee::{run_match, write_report};

fn print_usage() {
    eprintln!(
        "Usage: riverclaim --map FILE [--bots LIST] [--settings LIST] [--visfile FILE] [--quiet]"
    );
}

/// Parses a bot list like `baseline,random1*3,zombie` into strategies.
fn parse_bots(spec: &str) -> Result<Vec<Strategy>, String> {
    let mut bots = Vec::new();
    for part in spec.split(',') {
        let reps: Vec<&str> = part.split('*').collect();
        match reps.as_slice() {
            [name] => bots.push(name.parse::<Strategy>().map_err(|e| e.to_string())?),
            [name, count] => {
                let strategy = name.parse::<Strategy>().map_err(|e| e.to_string())?;
                let n: usize = count
                    .parse()
                    .map_err(|_| format!("invalid bots spec: {}", spec))?;
                bots.extend(std::iter::repeat(strategy).take(n));
            }
            _ => return Err(format!("invalid bots spec: {}", spec)),
        }
    }
    Ok(bots)
}

/// Writes the visualizer log: the map as one JSON line, then one line per
/// claimed river.
fn write_visfile(path: &str, map: &MapDef, moves: &[Move]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut out = io::BufWriter::new(file);
    let map_json = serde_json::to_string(map).expect("map serialization cannot fail");
    writeln!(out, "{}", map_json)?;
    for mv in moves {
        match mv {
            Move::Claim {
                punter,
                source,
                target,
            } => writeln!(out, "{} {} {}", punter, source, target)?,
            Move::Splurge { punter, route } => {
                for leg in route.windows(2) {
                    writeln!(out, "{} {} {}", punter, leg[0], leg[1])?;
                }
            }
            Move::Pass { .. } => {}
        }
    }
    out.flush()
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut map_path: Option<String> = None;
    let mut bots_spec = "baseline,baseline".to_string();
    let mut settings_spec = String::new();
    let mut vis_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--map" => {
                i += 1;
                map_path = Some(args[i].clone());
            }
            "--bots" => {
                i += 1;
                bots_spec = args[i].clone();
            }
            "--settings" => {
                i += 1;
                settings_spec = args[i].clone();
            }
            "--visfile" => {
                i += 1;
                vis_path = Some(args[i].clone());
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

    let bots = parse_bots(&bots_spec).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    let settings: Settings = settings_spec.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    eprintln!("Settings: {}", settings);

    let stderr = io::stderr();
    let result = if quiet {
        run_match(&map, &bots, settings, &mut io::sink())
    } else {
        run_match(&map, &bots, settings, &mut stderr.lock())
    };

    let outcome = result.unwrap_or_else(|e| {
        eprintln!("Match failed: {}", e);
        process::exit(1);
    });

    let stdout = io::stdout();
    write_report(&outcome, &mut stdout.lock()).expect("failed to write report");

    if let Some(path) = vis_path {
        if let Err(e) = write_visfile(&path, &map, &outcome.moves) {
            eprintln!("Can't write vis file {}: {}", path, e);
            process::exit(1);
        }
    }
}
