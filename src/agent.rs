// Applies the scorer's decision to one snake's body

use std::collections::HashSet;

use crate::scorer::MoveScorer;
use crate::types::{Cell, Fruits, Snake};

/// Drives one snake for a single tick
pub struct SnakeAgent<'a> {
    snake: &'a mut Snake,
    scorer: &'a MoveScorer,
}

impl<'a> SnakeAgent<'a> {
    pub fn new(snake: &'a mut Snake, scorer: &'a MoveScorer) -> Self {
        SnakeAgent { snake, scorer }
    }

    /// Chooses a direction and pushes the new head onto the body.
    ///
    /// The tail is left in place: whether it is popped depends on what the head lands on,
    /// which is for the round resolver to decide.
    pub fn advance(&mut self, food: Cell, fruits: &Fruits, other_bodies: &HashSet<Cell>) -> Cell {
        assert!(self.snake.alive, "cannot move dead snake {}", self.snake.name);

        let direction = self
            .scorer
            .choose_direction(self.snake, other_bodies, food, fruits);
        let new_head = direction.apply(&self.snake.head());
        self.snake.body.push_front(new_head);
        new_head
    }
}
