// Round setup and the outer tick loop
//
// The resolver only advances ticks; this module decides where snakes start, owns the RNG,
// feeds the debug log and turns the final state into a leaderboard.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::config::{ArenaConfig, Config};
use crate::debug_logger::{DebugLogger, TickLogEntry};
use crate::round::{self, RoundResolver};
use crate::types::{Cell, DeathCause, Direction, Fruits, GlyphKind, RoundState, Snake};

/// One row of the end-of-round leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    /// Index of the snake in spawn order
    pub slot: usize,
    pub name: String,
    pub score: u32,
    pub length: usize,
    pub death_order: Option<u32>,
    pub death_cause: Option<DeathCause>,
}

/// Outcome of `Arena::run`
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub ticks: u64,
    /// False when the tick cap stopped the round with snakes still alive
    pub finished: bool,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub struct Arena {
    config: Config,
    resolver: RoundResolver,
    snakes: Vec<Snake>,
    food: Cell,
    fruits: Fruits,
    rng: StdRng,
    tick: u64,
    state: RoundState,
    logger: DebugLogger,
}

impl Arena {
    /// Spawns `snake_count` snakes and places the first food
    pub fn new(config: Config, mut rng: StdRng) -> Result<Self, String> {
        config.validate()?;

        let board = config.arena.board();
        let snakes = spawn_snakes(&config.arena);
        let food = board
            .random_free_cell(&mut rng, &snakes, &Fruits::new())
            .ok_or("No free cell left for the first food")?;

        Ok(Self::with_layout(config, board, snakes, food, rng))
    }

    /// Uses `[arena].seed` when set, otherwise seeds from the OS
    pub fn from_config(config: Config) -> Result<Self, String> {
        let rng = match config.arena.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config, rng)
    }

    /// Starts a round from a caller-supplied layout. The fruit set starts empty.
    pub fn with_layout(
        config: Config,
        board: Board,
        snakes: Vec<Snake>,
        food: Cell,
        rng: StdRng,
    ) -> Self {
        assert!(board.in_interior(&food), "food must start inside the interior");
        assert!(
            snakes.iter().all(|s| s.body.iter().all(|c| board.in_interior(c))),
            "snakes must start inside the interior"
        );

        let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
        let state = if snakes.iter().any(|s| s.alive) {
            RoundState::Running
        } else {
            RoundState::Finished
        };

        info!(
            "Round start: {} snakes on a {}x{} board",
            snakes.len(),
            board.width,
            board.height
        );

        Arena {
            resolver: RoundResolver::new(board, &config),
            config,
            snakes,
            food,
            fruits: Fruits::new(),
            rng,
            tick: 0,
            state,
            logger,
        }
    }

    /// Replaces the debug logger (e.g. to log to a specific file in tests)
    pub fn set_logger(&mut self, logger: DebugLogger) {
        self.logger = logger;
    }

    pub fn board(&self) -> Board {
        self.resolver.board()
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn fruits(&self) -> &Fruits {
        &self.fruits
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn render_cells(&self) -> Vec<(Cell, GlyphKind)> {
        round::render_cells(&self.snakes, self.food, &self.fruits)
    }

    /// Advances one tick. A finished round stays finished.
    pub fn tick(&mut self) -> RoundState {
        if self.state == RoundState::Finished {
            return self.state;
        }

        let tick_seed: u64 = self.rng.random();
        let mut tick_rng = StdRng::seed_from_u64(tick_seed);

        let before = self.logger.is_enabled().then(|| {
            (
                self.snakes.clone(),
                self.food,
                self.fruits.clone(),
                self.resolver.deaths(),
            )
        });

        self.state = self
            .resolver
            .step(&mut self.snakes, &mut self.food, &mut self.fruits, &mut tick_rng);

        if let Some((snakes, food, fruits, deaths)) = before {
            let chosen = snakes
                .iter()
                .zip(&self.snakes)
                .map(|(pre, post)| pre.alive.then_some(post.direction))
                .collect();
            self.logger.log_tick(&TickLogEntry {
                tick: self.tick,
                tick_seed,
                deaths,
                board: self.board(),
                snakes,
                food,
                fruits,
                chosen,
                timestamp: chrono::Utc::now().to_rfc3339(),
            });
        }

        self.tick += 1;
        self.state
    }

    /// Ticks until every snake is dead or `max_ticks` is reached
    pub fn run(&mut self) -> RoundSummary {
        while self.state == RoundState::Running && self.tick < self.config.arena.max_ticks {
            self.tick();
        }

        let finished = self.state == RoundState::Finished;
        if finished {
            info!("Round finished after {} ticks", self.tick);
        } else {
            warn!(
                "Round stopped at the {} tick cap with {} snakes alive",
                self.tick,
                self.snakes.iter().filter(|s| s.alive).count()
            );
        }

        RoundSummary {
            ticks: self.tick,
            finished,
            leaderboard: self.leaderboard(),
        }
    }

    /// Best first; survivors (if any) ahead of the dead
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        round::ranking(&self.snakes)
            .into_iter()
            .enumerate()
            .map(|(i, (slot, s))| LeaderboardEntry {
                rank: i + 1,
                slot,
                name: s.name.clone(),
                score: s.score,
                length: s.len(),
                death_order: s.death_order,
                death_cause: s.death_cause,
            })
            .collect()
    }
}

/// Seed of the `index`-th round in a series starting at `base`. Wraps at `u64::MAX`.
pub fn round_seed(base: u64, index: u64) -> u64 {
    base.wrapping_add(index)
}

/// Lays out 3-cell snakes: even indices on the top rows heading down, odd indices on the
/// bottom rows heading up at the mirrored column. Snakes 0 and 1 start in opposite corners.
pub fn spawn_snakes(arena: &ArenaConfig) -> Vec<Snake> {
    let columns = arena.spawn_columns();
    let interior_width = (arena.width - 2) as usize;
    let bottom = arena.height - 2;

    (0..arena.snake_count)
        .map(|i| {
            let x = 1 + ((i / 2) * interior_width / columns) as i32;
            let name = format!("Snake {}", i + 1);
            if i % 2 == 0 {
                let body = vec![Cell::new(x, 3), Cell::new(x, 2), Cell::new(x, 1)];
                Snake::new(name, body, Direction::Down)
            } else {
                let x = arena.width - 1 - x;
                let body = vec![
                    Cell::new(x, bottom - 2),
                    Cell::new(x, bottom - 1),
                    Cell::new(x, bottom),
                ];
                Snake::new(name, body, Direction::Up)
            }
        })
        .collect()
}
