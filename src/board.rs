// Board bounds and occupancy queries
//
// The board is `width` x `height` including a one-cell wall on every side.
// Only the interior [1, width-2] x [1, height-2] is playable.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{Cell, Fruits, Snake};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 3 && height >= 3, "board must have a non-empty interior");
        Board { width, height }
    }

    /// Checks if a cell lies in the playable interior
    pub fn in_interior(&self, cell: &Cell) -> bool {
        cell.x >= 1 && cell.x <= self.width - 2 && cell.y >= 1 && cell.y <= self.height - 2
    }

    /// Interior cells in row-major order
    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (1..=self.height - 2).flat_map(move |y| (1..=self.width - 2).map(move |x| Cell { x, y }))
    }

    /// Union of every live snake's body
    pub fn occupied(snakes: &[Snake]) -> HashSet<Cell> {
        snakes
            .iter()
            .filter(|s| s.alive)
            .flat_map(|s| s.body.iter().copied())
            .collect()
    }

    /// Picks a uniformly random interior cell that holds no snake segment and no fruit.
    /// Returns None when the interior is full.
    pub fn random_free_cell<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        snakes: &[Snake],
        fruits: &Fruits,
    ) -> Option<Cell> {
        let occupied = Self::occupied(snakes);
        let free: Vec<Cell> = self
            .interior_cells()
            .filter(|c| !occupied.contains(c) && !fruits.contains(c))
            .collect();

        if free.is_empty() {
            return None;
        }

        Some(free[rng.random_range(0..free.len())])
    }
}
