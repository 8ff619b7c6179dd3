// Bounded flood fill used to judge how much room a candidate move leaves
//
// The returned value is a heuristic, not an exact area: once a target has been seen and
// enough cells are counted the fill stops and returns an inflated count.

use std::collections::HashSet;

use crate::board::Board;
use crate::config::FloodFillConfig;
use crate::profile;
use crate::profiler::Category;
use crate::types::{Cell, Direction};

#[derive(Debug, Clone)]
pub struct FreeSpaceEstimator {
    board: Board,
    early_exit_threshold: i32,
    early_exit_bonus: i32,
    food_bonus: i32,
    early_exit: bool,
}

impl FreeSpaceEstimator {
    pub fn new(board: Board, config: &FloodFillConfig) -> Self {
        FreeSpaceEstimator {
            board,
            early_exit_threshold: config.early_exit_threshold,
            early_exit_bonus: config.early_exit_bonus,
            food_bonus: config.food_bonus,
            early_exit: true,
        }
    }

    /// Same estimator, but always runs the fill to completion
    pub fn without_early_exit(mut self) -> Self {
        self.early_exit = false;
        self
    }

    /// Counts interior cells reachable from `start` without crossing `obstacles`.
    ///
    /// Adds `food_bonus` when a member of `targets` is reachable. With early exit enabled,
    /// returns `count + early_exit_bonus` as soon as a target has been seen and the count
    /// exceeds `early_exit_threshold`.
    pub fn estimate(&self, start: Cell, obstacles: &HashSet<Cell>, targets: &[Cell]) -> i32 {
        profile!(Category::FloodFill, {
            debug_assert!(
                !obstacles.contains(&start),
                "flood fill must start on a free cell"
            );

            let mut visited: HashSet<Cell> = HashSet::new();
            let mut stack = vec![start];
            let mut count = 0;
            let mut found_food = false;

            while let Some(cell) = stack.pop() {
                if !self.board.in_interior(&cell)
                    || obstacles.contains(&cell)
                    || !visited.insert(cell)
                {
                    continue;
                }

                count += 1;
                if targets.contains(&cell) {
                    found_food = true;
                }

                if self.early_exit && found_food && count > self.early_exit_threshold {
                    return count + self.early_exit_bonus;
                }

                for dir in Direction::all() {
                    let next = dir.apply(&cell);
                    if !visited.contains(&next) {
                        stack.push(next);
                    }
                }
            }

            if found_food {
                count + self.food_bonus
            } else {
                count
            }
        })
    }
}
