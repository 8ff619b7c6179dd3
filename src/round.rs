// Per-tick round resolution
//
// Snakes move one at a time in slice order. Each one is checked against the other bodies as
// they stand at that moment, so a snake can be blocked by a tail that would have moved under
// fully simultaneous rules.

use log::{debug, info, warn};
use rand::Rng;
use std::cmp::Reverse;
use std::collections::HashSet;

use crate::agent::SnakeAgent;
use crate::board::Board;
use crate::config::Config;
use crate::profile;
use crate::profiler::Category;
use crate::scorer::MoveScorer;
use crate::types::{Cell, DeathCause, Fruits, GlyphKind, RoundState, Snake};

#[derive(Debug, Clone)]
pub struct RoundResolver {
    board: Board,
    scorer: MoveScorer,
    /// Deaths so far this round; the next death gets `deaths + 1`
    deaths: u32,
}

impl RoundResolver {
    pub fn new(board: Board, config: &Config) -> Self {
        Self::with_scorer(board, MoveScorer::new(board, config))
    }

    pub fn with_scorer(board: Board, scorer: MoveScorer) -> Self {
        RoundResolver {
            board,
            scorer,
            deaths: 0,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Resumes counting from a known number of deaths (used when replaying a logged tick)
    pub fn set_deaths(&mut self, deaths: u32) {
        self.deaths = deaths;
    }

    /// Advances every live snake by one tick.
    ///
    /// `rng` is only used to respawn food after it is eaten.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        snakes: &mut [Snake],
        food: &mut Cell,
        fruits: &mut Fruits,
        rng: &mut R,
    ) -> RoundState {
        profile!(Category::Step, {
            assert!(
                self.board.in_interior(food),
                "food at ({}, {}) is outside the interior",
                food.x,
                food.y
            );

            for i in 0..snakes.len() {
                if !snakes[i].alive {
                    continue;
                }

                let other_bodies: HashSet<Cell> = snakes
                    .iter()
                    .enumerate()
                    .filter(|(j, s)| *j != i && s.alive)
                    .flat_map(|(_, s)| s.body.iter().copied())
                    .collect();

                let ate_food = {
                    let snake = &mut snakes[i];
                    let new_head =
                        SnakeAgent::new(snake, &self.scorer).advance(*food, fruits, &other_bodies);

                    match self.collision(snake, new_head, &other_bodies) {
                        Some(cause) => {
                            self.kill(snake, cause, fruits);
                            false
                        }
                        None if new_head == *food => {
                            snake.score += 1;
                            debug!("{} ate food at ({}, {})", snake.name, food.x, food.y);
                            true
                        }
                        None if fruits.remove(&new_head) => {
                            snake.score += 1;
                            debug!("{} ate fruit at ({}, {})", snake.name, new_head.x, new_head.y);
                            false
                        }
                        None => {
                            snake.body.pop_back();
                            false
                        }
                    }
                };

                if ate_food {
                    match self.board.random_free_cell(rng, snakes, fruits) {
                        Some(cell) => *food = cell,
                        None => warn!("No free cell left for food; leaving it in place"),
                    }
                }
            }

            if snakes.iter().any(|s| s.alive) {
                RoundState::Running
            } else {
                RoundState::Finished
            }
        })
    }

    /// Checks the freshly inserted head against walls, the rest of the body and other snakes
    fn collision(
        &self,
        snake: &Snake,
        new_head: Cell,
        other_bodies: &HashSet<Cell>,
    ) -> Option<DeathCause> {
        if !self.board.in_interior(&new_head) {
            Some(DeathCause::Wall)
        } else if snake.body.iter().skip(1).any(|c| *c == new_head) {
            Some(DeathCause::SelfCollision)
        } else if other_bodies.contains(&new_head) {
            Some(DeathCause::SnakeCollision)
        } else {
            None
        }
    }

    /// Marks the snake dead and drops its body (without the fatal head) as fruit
    fn kill(&mut self, snake: &mut Snake, cause: DeathCause, fruits: &mut Fruits) {
        self.deaths += 1;
        snake.alive = false;
        snake.death_order = Some(self.deaths);
        snake.death_cause = Some(cause);
        snake.current_target = None;

        snake.body.pop_front();
        fruits.extend(snake.body.drain(..));

        info!(
            "{} died ({}) with score {}, death order {}",
            snake.name,
            cause.as_str(),
            snake.score,
            self.deaths
        );
    }
}

/// Snakes ordered best first, paired with their slice index: survivors in slice order,
/// then the dead by death order descending
pub fn ranking(snakes: &[Snake]) -> Vec<(usize, &Snake)> {
    let mut ranked: Vec<(usize, &Snake)> = snakes.iter().enumerate().collect();
    ranked.sort_by_key(|(_, s)| Reverse(s.death_order.unwrap_or(u32::MAX)));
    ranked
}

/// Everything a renderer needs to draw: live snake segments, the food and each fruit
pub fn render_cells(snakes: &[Snake], food: Cell, fruits: &Fruits) -> Vec<(Cell, GlyphKind)> {
    let mut cells = Vec::new();
    for (idx, snake) in snakes.iter().enumerate().filter(|(_, s)| s.alive) {
        for (pos, cell) in snake.body.iter().enumerate() {
            let kind = if pos == 0 {
                GlyphKind::Head(idx)
            } else {
                GlyphKind::Body(idx)
            };
            cells.push((*cell, kind));
        }
    }
    cells.push((food, GlyphKind::Food));
    cells.extend(fruits.iter().map(|c| (*c, GlyphKind::Fruit)));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
        v.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_ranking_orders_by_death() {
        let mut a = Snake::new("a", cells(&[(1, 1)]), Direction::Up);
        let mut b = Snake::new("b", cells(&[(2, 2)]), Direction::Up);
        let c = Snake::new("c", cells(&[(3, 3)]), Direction::Up);
        a.alive = false;
        a.death_order = Some(2);
        b.alive = false;
        b.death_order = Some(1);

        let snakes = vec![a, b, c];
        let order: Vec<(usize, &str)> = ranking(&snakes)
            .iter()
            .map(|(i, s)| (*i, s.name.as_str()))
            .collect();
        assert_eq!(order, vec![(2, "c"), (0, "a"), (1, "b")]);
    }

    #[test]
    fn test_render_cells_marks_heads() {
        let snakes = vec![
            Snake::new("a", cells(&[(2, 2), (2, 3)]), Direction::Up),
            Snake::new("b", cells(&[(5, 5)]), Direction::Up),
        ];
        let fruits: Fruits = [Cell::new(7, 7)].into_iter().collect();
        let view = render_cells(&snakes, Cell::new(4, 4), &fruits);

        assert!(view.contains(&(Cell::new(2, 2), GlyphKind::Head(0))));
        assert!(view.contains(&(Cell::new(2, 3), GlyphKind::Body(0))));
        assert!(view.contains(&(Cell::new(5, 5), GlyphKind::Head(1))));
        assert!(view.contains(&(Cell::new(4, 4), GlyphKind::Food)));
        assert!(view.contains(&(Cell::new(7, 7), GlyphKind::Fruit)));
        assert_eq!(view.len(), 5);
    }

    #[test]
    fn test_render_cells_skips_dead_snakes() {
        let mut dead = Snake::new("a", cells(&[(2, 2)]), Direction::Up);
        dead.alive = false;
        dead.body.clear();
        let view = render_cells(&[dead], Cell::new(4, 4), &Fruits::new());
        assert_eq!(view, vec![(Cell::new(4, 4), GlyphKind::Food)]);
    }

    #[test]
    fn test_wall_death_drops_pre_move_body() {
        // Coiled in the top-left corner facing the wall: every other move is blocked
        let board = Board::new(12, 12);
        let mut resolver = RoundResolver::new(board, &Config::default_hardcoded());
        let body = cells(&[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let mut snakes = vec![Snake::new("a", body.clone(), Direction::Up)];
        let mut food = Cell::new(9, 9);
        let mut fruits = Fruits::new();
        let mut rng = StdRng::seed_from_u64(1);

        let state = resolver.step(&mut snakes, &mut food, &mut fruits, &mut rng);

        assert_eq!(state, RoundState::Finished);
        let a = &snakes[0];
        assert!(!a.alive);
        assert_eq!(a.death_order, Some(1));
        assert_eq!(a.death_cause, Some(DeathCause::Wall));
        assert!(a.body.is_empty());
        assert_eq!(fruits, body.into_iter().collect::<Fruits>());
        assert!(fruits.iter().all(|c| board.in_interior(c)));
    }
}
