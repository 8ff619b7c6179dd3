// Debug logging module for per-tick arena state
//
// Each tick's pre-move state and the directions chosen during it are written as one JSON
// line, so a round can be replayed tick by tick (see replay.rs).

use log::error;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use crate::board::Board;
use crate::types::{Cell, Direction, Fruits, Snake};

/// One line of the tick log
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TickLogEntry {
    pub tick: u64,
    /// Seed of the RNG used for food respawn during this tick
    pub tick_seed: u64,
    /// Deaths recorded before this tick
    pub deaths: u32,
    pub board: Board,
    /// Snakes as they stood before the tick
    pub snakes: Vec<Snake>,
    pub food: Cell,
    pub fruits: Fruits,
    /// Direction chosen by each snake during the tick; None for snakes already dead
    pub chosen: Vec<Option<Direction>>,
    pub timestamp: String,
}

/// Writes tick entries to a JSONL file; a disabled logger ignores every call
pub struct DebugLogger {
    file: Option<BufWriter<File>>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Some(BufWriter::new(file)),
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Appends one entry. Failures are logged and otherwise ignored.
    pub fn log_tick(&mut self, entry: &TickLogEntry) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        match serde_json::to_string(entry) {
            Ok(json_line) => {
                let result = writeln!(file, "{}", json_line).and_then(|_| file.flush());
                if let Err(e) = result {
                    error!("Failed to write debug log entry: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn entry(tick: u64) -> TickLogEntry {
        TickLogEntry {
            tick,
            tick_seed: 99,
            deaths: 0,
            board: Board::new(10, 10),
            snakes: vec![Snake::new(
                "a",
                vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4)],
                Direction::Up,
            )],
            food: Cell::new(5, 5),
            fruits: Fruits::new(),
            chosen: vec![Some(Direction::Up)],
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let mut logger = DebugLogger::disabled();
        assert!(!logger.is_enabled());
        logger.log_tick(&entry(0));
    }

    #[test]
    fn test_entries_are_written_one_per_line() {
        let path = std::env::temp_dir().join(format!("snake_arena_logger_{}.jsonl", std::process::id()));
        let path_str = path.to_str().unwrap().to_string();

        {
            let mut logger = DebugLogger::new(true, &path_str);
            assert!(logger.is_enabled());
            logger.log_tick(&entry(0));
            logger.log_tick(&entry(1));
        }

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: TickLogEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.tick, 1);
        assert_eq!(parsed.snakes[0].body.len(), 3);
        assert_eq!(parsed.chosen, vec![Some(Direction::Up)]);

        fs::remove_file(&path).ok();
    }
}
