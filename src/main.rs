// Headless arena runner
//
// Usage:
//   cargo run --bin snake-arena -- [options]
//
// Options:
//   --config <path>   Path to Snake.toml (default: Snake.toml)
//   --rounds <n>      Number of rounds to play (default: 1)
//   --seed <n>        RNG seed for the first round; later rounds use seed + round index
//   --snakes <n>      Override arena.snake_count
//   --paced           Sleep arena.tick_delay_ms between ticks

use log::info;
use std::env;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use snake_arena::arena::{self, Arena, RoundSummary};
use snake_arena::config::Config;
use snake_arena::profiler;
use snake_arena::types::RoundState;

struct Options {
    config_path: Option<String>,
    rounds: u32,
    seed: Option<u64>,
    snakes: Option<usize>,
    paced: bool,
}

fn print_usage() {
    eprintln!("Snake Arena");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  snake-arena [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --config <path>   Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --rounds <n>      Number of rounds to play (default: 1)");
    eprintln!("  --seed <n>        RNG seed for the first round");
    eprintln!("  --snakes <n>      Override the number of snakes");
    eprintln!("  --paced           Sleep tick_delay_ms between ticks");
    eprintln!("  --help            Show this help message");
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    let raw = args
        .get(i + 1)
        .ok_or_else(|| format!("{} requires an argument", flag))?;
    raw.parse::<T>()
        .map_err(|e| format!("Invalid value '{}' for {}: {}", raw, flag, e))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        rounds: 1,
        seed: None,
        snakes: None,
        paced: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                options.config_path = Some(parse_value(args, i, "--config")?);
                i += 1;
            }
            "--rounds" => {
                options.rounds = parse_value(args, i, "--rounds")?;
                i += 1;
            }
            "--seed" => {
                options.seed = Some(parse_value(args, i, "--seed")?);
                i += 1;
            }
            "--snakes" => {
                options.snakes = Some(parse_value(args, i, "--snakes")?);
                i += 1;
            }
            "--paced" => {
                options.paced = true;
            }
            other => return Err(format!("Unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn print_leaderboard(round: u32, summary: &RoundSummary) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!(
        "  ROUND {} - {} ticks{}",
        round,
        summary.ticks,
        if summary.finished { "" } else { " (tick cap reached)" }
    );
    println!("═══════════════════════════════════════════════════════════");
    for entry in &summary.leaderboard {
        let fate = match (entry.death_order, entry.death_cause) {
            (Some(order), Some(cause)) => format!("died #{} ({})", order, cause.as_str()),
            _ => "alive".to_string(),
        };
        println!(
            "{:>3}. {:<12} score {:>3}  length {:>3}  {}",
            entry.rank, entry.name, entry.score, entry.length, fate
        );
    }
}

fn main() {
    // Default to 'info' unless RUST_LOG is already set
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    let options = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match &options.config_path {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Config::load_or_default(),
    };
    if let Some(n) = options.snakes {
        config.arena.snake_count = n;
    }
    if let Some(seed) = options.seed {
        config.arena.seed = Some(seed);
    }

    let delay = Duration::from_millis(config.arena.tick_delay_ms);
    let start_time = Instant::now();

    for round in 1..=options.rounds {
        let mut round_config = config.clone();
        round_config.arena.seed = config
            .arena
            .seed
            .map(|s| arena::round_seed(s, u64::from(round - 1)));

        let mut arena = match Arena::from_config(round_config) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

        if options.paced {
            while arena.state() == RoundState::Running
                && arena.tick_count() < config.arena.max_ticks
            {
                arena.tick();
                info!(
                    "Tick {}: {} alive, {} fruit",
                    arena.tick_count(),
                    arena.snakes().iter().filter(|s| s.alive).count(),
                    arena.fruits().len()
                );
                thread::sleep(delay);
            }
        }

        let summary = arena.run();

        print_leaderboard(round, &summary);
    }

    profiler::merge_thread_local();
    profiler::print_report(start_time.elapsed().as_millis() as u64);
}
