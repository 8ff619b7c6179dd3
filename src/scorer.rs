// Greedy per-tick move selection
//
// Every tick each candidate move is scored from its distance to the target, the free space
// behind it and a few momentum bonuses; the best one wins. No lookahead beyond the flood fill.

use log::debug;
use std::collections::HashSet;

use crate::board::Board;
use crate::config::{Config, ScoresConfig};
use crate::profile;
use crate::profiler::Category;
use crate::space::FreeSpaceEstimator;
use crate::types::{Cell, Direction, Fruits, Snake};

/// A safe move and how it scored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub direction: Direction,
    pub new_head: Cell,
    pub distance: i32,
    pub space: i32,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct MoveScorer {
    board: Board,
    scores: ScoresConfig,
    estimator: FreeSpaceEstimator,
}

impl MoveScorer {
    pub fn new(board: Board, config: &Config) -> Self {
        MoveScorer {
            board,
            scores: config.scores.clone(),
            estimator: FreeSpaceEstimator::new(board, &config.flood_fill),
        }
    }

    /// Closest of food and fruit by Manhattan distance from the head.
    /// On a tie the snake keeps its current target; otherwise food wins, then fruit in cell order.
    pub fn choose_target(&self, snake: &Snake, food: Cell, fruits: &Fruits) -> Cell {
        let head = snake.head();
        let items = || std::iter::once(food).chain(fruits.iter().copied());

        let best = items().map(|c| head.manhattan(&c)).min().unwrap_or(0);

        if let Some(current) = snake.current_target {
            if head.manhattan(&current) == best && items().any(|c| c == current) {
                return current;
            }
        }

        items()
            .find(|c| head.manhattan(c) == best)
            .unwrap_or(food)
    }

    /// A cell is safe when it is in the interior, not in our body (the tail is about to move)
    /// and not in any other snake's body.
    pub fn is_safe(&self, snake: &Snake, cell: &Cell, other_bodies: &HashSet<Cell>) -> bool {
        if !self.board.in_interior(cell) || other_bodies.contains(cell) {
            return false;
        }
        let without_tail = snake.body.len().saturating_sub(1);
        !snake.body.iter().take(without_tail).any(|c| c == cell)
    }

    /// Scores every safe move, in canonical direction order
    pub fn candidates(
        &self,
        snake: &Snake,
        target: Cell,
        other_bodies: &HashSet<Cell>,
    ) -> Vec<Candidate> {
        profile!(Category::ScoreMoves, {
            let head = snake.head();
            let s = &self.scores;

            // Own tail is excluded: it vacates this tick
            let without_tail = snake.body.len().saturating_sub(1);
            let mut obstacles: HashSet<Cell> =
                snake.body.iter().take(without_tail).copied().collect();
            obstacles.extend(other_bodies.iter().copied());

            let dx = target.x - head.x;
            let dy = target.y - head.y;

            let mut out = Vec::with_capacity(4);
            for dir in Direction::all() {
                if snake.body.len() > 1 && dir == snake.direction.opposite() {
                    continue;
                }

                let new_head = dir.apply(&head);
                if !self.is_safe(snake, &new_head, other_bodies) {
                    continue;
                }

                let distance = new_head.manhattan(&target);
                let space = self.estimator.estimate(new_head, &obstacles, &[target]);

                let mut score = -s.distance_weight * distance as f64
                    + s.space_weight * space as f64
                    + s.base_score;

                if dir == snake.direction {
                    score += s.same_direction_bonus;
                }
                if dir == snake.previous_direction {
                    score += s.previous_direction_bonus;
                }

                let (vx, vy) = dir.delta();
                if (vx != 0 && vx.signum() == dx.signum()) || (vy != 0 && vy.signum() == dy.signum())
                {
                    score += s.alignment_bonus;
                }

                let straight_shot = (dx.abs() == 1 && dy == 0) || (dy.abs() == 1 && dx == 0);
                if distance <= s.straight_shot_radius && straight_shot {
                    score += s.straight_shot_bonus;
                } else if distance < s.near_radius {
                    score += s.near_bonus;
                } else if distance < s.mid_radius {
                    score += s.mid_bonus;
                }

                if space < s.critical_space {
                    score -= s.critical_space_penalty;
                } else if space < s.low_space {
                    score -= s.low_space_penalty;
                }

                out.push(Candidate {
                    direction: dir,
                    new_head,
                    distance,
                    space,
                    score,
                });
            }
            out
        })
    }

    /// Picks the next direction for a live snake and records it on the snake.
    ///
    /// Ties go to the first candidate in canonical order. With no safe candidate the snake
    /// keeps its direction and will die in collision resolution.
    pub fn choose_direction(
        &self,
        snake: &mut Snake,
        other_bodies: &HashSet<Cell>,
        food: Cell,
        fruits: &Fruits,
    ) -> Direction {
        assert!(snake.alive, "cannot choose a move for dead snake {}", snake.name);

        let target = self.choose_target(snake, food, fruits);
        snake.current_target = Some(target);

        let mut best: Option<Candidate> = None;
        for candidate in self.candidates(snake, target, other_bodies) {
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        let chosen = match best {
            Some(c) => {
                debug!(
                    "{}: {} toward ({}, {}) score {:.1} space {}",
                    snake.name,
                    c.direction.as_str(),
                    target.x,
                    target.y,
                    c.score,
                    c.space
                );
                c.direction
            }
            None => {
                debug!("{}: no safe move, keeping {}", snake.name, snake.direction.as_str());
                snake.direction
            }
        };

        snake.previous_direction = snake.direction;
        snake.direction = chosen;
        chosen
    }
}
