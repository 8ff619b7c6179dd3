// Replay module for re-running logged ticks
//
// This module provides functionality to:
// 1. Parse JSONL tick logs written by the debug logger
// 2. Re-run each tick from its logged pre-tick state
// 3. Compare logged vs replayed directions
// 4. Summarize the result

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::TickLogEntry;
use crate::round::RoundResolver;
use crate::types::Direction;

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub tick: u64,
    pub original: Vec<Option<Direction>>,
    pub replayed: Vec<Option<Direction>>,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing tick logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<TickLogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: TickLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Re-runs one tick from its logged state and compares the chosen directions
    pub fn replay_entry(&self, entry: &TickLogEntry) -> Result<ReplayResult, String> {
        if entry.chosen.len() != entry.snakes.len() {
            return Err(format!(
                "Tick {}: {} logged moves for {} snakes",
                entry.tick,
                entry.chosen.len(),
                entry.snakes.len()
            ));
        }
        if let Some(s) = entry.snakes.iter().find(|s| s.alive && s.body.is_empty()) {
            return Err(format!("Tick {}: live snake {} has no body", entry.tick, s.name));
        }
        if !entry.board.in_interior(&entry.food) {
            return Err(format!("Tick {}: food outside the interior", entry.tick));
        }

        let start_time = Instant::now();

        let mut resolver = RoundResolver::new(entry.board, &self.config);
        resolver.set_deaths(entry.deaths);

        let mut snakes = entry.snakes.clone();
        let mut food = entry.food;
        let mut fruits = entry.fruits.clone();
        let mut rng = StdRng::seed_from_u64(entry.tick_seed);

        resolver.step(&mut snakes, &mut food, &mut fruits, &mut rng);

        let replayed: Vec<Option<Direction>> = entry
            .snakes
            .iter()
            .zip(&snakes)
            .map(|(pre, post)| pre.alive.then_some(post.direction))
            .collect();

        let matches = replayed == entry.chosen;
        let computation_time_us = start_time.elapsed().as_micros();

        if self.verbose {
            if matches {
                info!("Tick {}: ✓ MATCH ({}µs)", entry.tick, computation_time_us);
            } else {
                warn!(
                    "Tick {}: ✗ MISMATCH - Original: {}, Replayed: {}",
                    entry.tick,
                    format_moves(&entry.chosen),
                    format_moves(&replayed)
                );
            }
        }

        Ok(ReplayResult {
            tick: entry.tick,
            original: entry.chosen.clone(),
            replayed,
            matches,
            computation_time_us,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[TickLogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", entry.tick, e);
                }
            }
        }

        results
    }

    /// Replays specific ticks from a log file
    pub fn replay_ticks(
        &self,
        entries: &[TickLogEntry],
        ticks: &[u64],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for tick in ticks {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log file", tick))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_ticks - matches;
        let match_rate = if total_ticks > 0 {
            (matches as f64 / total_ticks as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_ticks,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Ticks:    {}", stats.total_ticks);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Tick Time:   {:.1}µs\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Tick {}: {} → {}",
                    result.tick,
                    format_moves(&result.original),
                    format_moves(&result.replayed)
                );
            }
            println!();
        }
    }
}

/// "up,-,left" style summary, one slot per snake
fn format_moves(moves: &[Option<Direction>]) -> String {
    moves
        .iter()
        .map(|m| m.map_or("-", |d| d.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}
