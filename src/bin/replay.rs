// Standalone replay tool for tick logs written with [debug] enabled = true
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --ticks <t1,t2>        Replay specific ticks (comma-separated), default is all
//   --verbose              Show detailed output for each tick
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use snake_arena::config::Config;
use snake_arena::replay::ReplayEngine;

fn print_usage() {
    eprintln!("Snake Arena Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --ticks <T1,T2,...>     Replay specific ticks (comma-separated)");
    eprintln!("  --verbose               Show detailed output for each tick");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay every tick");
    eprintln!("  replay snake_arena_debug.jsonl");
    eprintln!();
    eprintln!("  # Replay specific ticks verbosely");
    eprintln!("  replay snake_arena_debug.jsonl --ticks 5,10,15 --verbose");
}

fn parse_ticks(s: &str) -> Result<Vec<u64>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u64>()
                .map_err(|e| format!("Invalid tick number '{}': {}", t, e))
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let log_file = &args[1];
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut ticks: Option<Vec<u64>> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--ticks" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --ticks requires an argument");
                    process::exit(1);
                }
                match parse_ticks(&args[i + 1]) {
                    Ok(t) => ticks = Some(t),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                }
                config_path = args[i + 1].clone();
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: {} - using hardcoded defaults", e);
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let results = match ticks {
        Some(t) => match engine.replay_ticks(&entries, &t) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => engine.replay_all(&entries),
    };

    engine.print_report(&results);

    let stats = engine.generate_stats(&results);
    if stats.mismatches > 0 {
        process::exit(2);
    }
}
