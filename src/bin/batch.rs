//! Batch simulation tool
//!
//! Plays many independent seeded rounds in parallel and reports how each spawn slot fares.
//! Rounds share nothing, so each one runs single-threaded on its own rayon worker.
//!
//! Usage:
//!   cargo run --release --bin batch -- [rounds] [first_seed] [--config <path>]

use rayon::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;
use std::time::Instant;

use snake_arena::arena::{round_seed, Arena, RoundSummary};
use snake_arena::config::Config;
use snake_arena::profiler;

#[derive(Debug, Default, Clone)]
struct SlotStats {
    wins: usize,
    total_score: u64,
    total_rank: u64,
}

fn run_round(config: &Config, seed: u64) -> Result<RoundSummary, String> {
    let mut round_config = config.clone();
    // Tick logs from parallel rounds would interleave
    round_config.debug.enabled = false;

    let mut arena = Arena::new(round_config, StdRng::seed_from_u64(seed))?;
    let summary = arena.run();
    profiler::merge_thread_local();
    Ok(summary)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut positional = Vec::new();
    let mut config_path = "Snake.toml".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                }
                config_path = args[i + 1].clone();
                i += 1;
            }
            "--help" => {
                eprintln!("Usage: batch [rounds] [first_seed] [--config <path>]");
                process::exit(0);
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let rounds: u64 = positional.first().and_then(|s| s.parse().ok()).unwrap_or(100);
    let first_seed: u64 = positional.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);

    let config = match Config::from_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {} - using hardcoded defaults", e);
            Config::default_hardcoded()
        }
    };

    println!(
        "Running {} rounds with {} snakes on {}x{} (seeds {}..{})",
        rounds,
        config.arena.snake_count,
        config.arena.width,
        config.arena.height,
        first_seed,
        round_seed(first_seed, rounds)
    );

    let start_time = Instant::now();
    let results: Vec<Result<RoundSummary, String>> = (0..rounds)
        .into_par_iter()
        .map(|i| run_round(&config, round_seed(first_seed, i)))
        .collect();

    let mut slots = vec![SlotStats::default(); config.arena.snake_count];
    let mut total_ticks = 0u64;
    let mut stalled = 0usize;
    let mut played = 0usize;

    for result in results {
        let summary = match result {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

        played += 1;
        total_ticks += summary.ticks;
        if !summary.finished {
            stalled += 1;
        }

        for entry in &summary.leaderboard {
            if let Some(stats) = slots.get_mut(entry.slot) {
                if entry.rank == 1 {
                    stats.wins += 1;
                }
                stats.total_score += u64::from(entry.score);
                stats.total_rank += entry.rank as u64;
            }
        }
    }

    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    let played_f = played.max(1) as f64;

    println!("\n═══════════════════════════════════════════════════════════");
    println!("                    BATCH REPORT");
    println!("═══════════════════════════════════════════════════════════");
    println!("Rounds:            {}", played);
    println!("Stalled (tick cap): {}", stalled);
    println!("Mean round length: {:.1} ticks", total_ticks as f64 / played_f);
    println!("Wall time:         {}ms\n", elapsed_ms);

    for (slot, stats) in slots.iter().enumerate() {
        println!(
            "Snake {:>2}: wins {:>4} ({:>5.1}%)  mean score {:>5.2}  mean rank {:>4.2}",
            slot + 1,
            stats.wins,
            100.0 * stats.wins as f64 / played_f,
            stats.total_score as f64 / played_f,
            stats.total_rank as f64 / played_f
        );
    }

    profiler::print_report(elapsed_ms);
}
