// Configuration module for reading Snake.toml
// Every tunable weight of the move heuristic lives here so it can be adjusted without a rebuild

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::board::Board;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub arena: ArenaConfig,
    pub scores: ScoresConfig,
    pub flood_fill: FloodFillConfig,
    pub debug: DebugConfig,
}

/// Board and round setup
#[derive(Debug, Deserialize, Clone)]
pub struct ArenaConfig {
    /// Full board width including both walls
    pub width: i32,
    /// Full board height including both walls
    pub height: i32,
    pub snake_count: usize,
    /// Safety cap for the outer run loop; the resolver itself has no limit
    pub max_ticks: u64,
    pub tick_delay_ms: u64,
    pub seed: Option<u64>,
}

impl ArenaConfig {
    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// Number of spawn columns; two snakes (top and bottom) share a column
    pub fn spawn_columns(&self) -> usize {
        self.snake_count.div_ceil(2)
    }
}

/// Move scoring weights
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    pub base_score: f64,
    /// Applied per unit of Manhattan distance to target (negative)
    pub distance_weight: f64,
    pub space_weight: f64,

    // Momentum
    pub same_direction_bonus: f64,
    pub previous_direction_bonus: f64,
    pub alignment_bonus: f64,

    // Close range
    pub straight_shot_radius: i32,
    pub straight_shot_bonus: f64,
    pub near_radius: i32,
    pub near_bonus: f64,
    pub mid_radius: i32,
    pub mid_bonus: f64,

    // Survival
    pub critical_space: i32,
    pub critical_space_penalty: f64,
    pub low_space: i32,
    pub low_space_penalty: f64,
}

/// Flood fill approximation constants
#[derive(Debug, Deserialize, Clone)]
pub struct FloodFillConfig {
    /// Once food is seen and more than this many cells are counted, stop early
    pub early_exit_threshold: i32,
    pub early_exit_bonus: i32,
    /// Bonus when the fill completes with food reachable
    pub food_bonus: i32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Hardcoded fallback. Must match Snake.toml.
    pub fn default_hardcoded() -> Self {
        Config {
            arena: ArenaConfig {
                width: 32,
                height: 22,
                snake_count: 4,
                max_ticks: 20_000,
                tick_delay_ms: 100,
                seed: None,
            },
            scores: ScoresConfig {
                base_score: 100.0,
                distance_weight: 15.0,
                space_weight: 0.2,
                same_direction_bonus: 50.0,
                previous_direction_bonus: 25.0,
                alignment_bonus: 75.0,
                straight_shot_radius: 2,
                straight_shot_bonus: 500.0,
                near_radius: 5,
                near_bonus: 150.0,
                mid_radius: 10,
                mid_bonus: 75.0,
                critical_space: 3,
                critical_space_penalty: 1000.0,
                low_space: 6,
                low_space_penalty: 200.0,
            },
            flood_fill: FloodFillConfig {
                early_exit_threshold: 15,
                early_exit_bonus: 75,
                food_bonus: 50,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snake_arena_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Rejects arenas that cannot hold the spawn layout
    pub fn validate(&self) -> Result<(), String> {
        let arena = &self.arena;
        if arena.snake_count == 0 {
            return Err("arena.snake_count must be at least 1".to_string());
        }
        if arena.width < 8 || arena.height < 8 {
            return Err(format!(
                "arena must be at least 8x8 including walls, got {}x{}",
                arena.width, arena.height
            ));
        }
        let interior_width = (arena.width - 2) as usize;
        if arena.spawn_columns() > interior_width {
            return Err(format!(
                "{} snakes need {} spawn columns but the interior is only {} wide",
                arena.snake_count,
                arena.spawn_columns(),
                interior_width
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.scores.distance_weight, 15.0);
        assert_eq!(config.flood_fill.early_exit_threshold, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");
        let hardcoded = Config::default_hardcoded();

        // Arena
        assert_eq!(file_config.arena.width, hardcoded.arena.width);
        assert_eq!(file_config.arena.height, hardcoded.arena.height);
        assert_eq!(file_config.arena.snake_count, hardcoded.arena.snake_count);
        assert_eq!(file_config.arena.max_ticks, hardcoded.arena.max_ticks);

        // Scores
        assert_eq!(file_config.scores.base_score, hardcoded.scores.base_score);
        assert_eq!(file_config.scores.distance_weight, hardcoded.scores.distance_weight);
        assert_eq!(file_config.scores.space_weight, hardcoded.scores.space_weight);
        assert_eq!(
            file_config.scores.straight_shot_bonus,
            hardcoded.scores.straight_shot_bonus
        );
        assert_eq!(
            file_config.scores.critical_space_penalty,
            hardcoded.scores.critical_space_penalty
        );

        // Flood fill
        assert_eq!(
            file_config.flood_fill.early_exit_threshold,
            hardcoded.flood_fill.early_exit_threshold
        );
        assert_eq!(
            file_config.flood_fill.early_exit_bonus,
            hardcoded.flood_fill.early_exit_bonus
        );
        assert_eq!(file_config.flood_fill.food_bonus, hardcoded.flood_fill.food_bonus);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_arena() {
        let mut config = Config::default_hardcoded();
        config.arena.snake_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_crowded_arena() {
        let mut config = Config::default_hardcoded();
        config.arena.width = 8;
        config.arena.snake_count = 14;
        assert!(config.validate().is_err());

        config.arena.snake_count = 12;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_board() {
        let mut config = Config::default_hardcoded();
        config.arena.height = 6;
        assert!(config.validate().is_err());
    }
}
