// Arena data model
// Cells, directions and the per-snake state shared by the scorer, agent and resolver

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Integer grid coordinate. x grows to the right, y grows downward (terminal rows).
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Fruit dropped by dead snakes. Ordered so iteration (and therefore targeting ties) is stable.
pub type Fruits = BTreeSet<Cell>;

/// Represents the four possible movement directions for a snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions in canonical candidate order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses a direction name, case-insensitive
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Unit vector (dx, dy)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Calculates the next cell when moving in this direction
    pub fn apply(&self, cell: &Cell) -> Cell {
        let (dx, dy) = self.delta();
        Cell { x: cell.x + dx, y: cell.y + dy }
    }
}

/// Why a snake left the round
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Head left the interior
    Wall,
    /// Head ran into its own body
    SelfCollision,
    /// Head ran into another snake's body
    SnakeCollision,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Wall => "wall",
            DeathCause::SelfCollision => "self collision",
            DeathCause::SnakeCollision => "snake collision",
        }
    }
}

/// One autonomous snake and everything the scorer remembers about it between ticks
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Snake {
    pub name: String,
    /// Head first, tail last
    pub body: VecDeque<Cell>,
    pub direction: Direction,
    pub previous_direction: Direction,
    pub alive: bool,
    /// 1 = died first; assigned once, at death
    pub death_order: Option<u32>,
    pub death_cause: Option<DeathCause>,
    pub score: u32,
    /// Food or fruit currently pursued; sticky across ticks
    pub current_target: Option<Cell>,
}

impl Snake {
    /// Creates a live snake. Panics on an empty body.
    pub fn new(name: impl Into<String>, body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "snake body must not be empty");
        Snake {
            name: name.into(),
            body: body.into(),
            direction,
            previous_direction: direction,
            alive: true,
            death_order: None,
            death_cause: None,
            score: 0,
            current_target: None,
        }
    }

    /// Head cell. Panics if the body is empty, which only happens after death.
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the renderer should draw at a cell
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    /// Head of the snake at this index
    Head(usize),
    /// Body segment of the snake at this index
    Body(usize),
    Food,
    Fruit,
}

/// Global round state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Running,
    Finished,
}
