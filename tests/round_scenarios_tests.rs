//! Scenario tests for move selection and round resolution
//!
//! Each test builds a small hand-made position and checks one behavior:
//! straight-shot pickup, wall avoidance, self collision, fruit drop and fruit pickup.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

use snake_arena::board::Board;
use snake_arena::config::Config;
use snake_arena::round::RoundResolver;
use snake_arena::scorer::MoveScorer;
use snake_arena::types::{Cell, DeathCause, Direction, Fruits, RoundState, Snake};

fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
    v.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

/// 10x10 interior
fn board() -> Board {
    Board::new(12, 12)
}

fn resolver() -> RoundResolver {
    RoundResolver::new(board(), &Config::default_hardcoded())
}

fn scorer() -> MoveScorer {
    MoveScorer::new(board(), &Config::default_hardcoded())
}

#[test]
fn test_straight_shot_to_adjacent_food() {
    // Heading up, food directly to the right of the head
    let mut snake = Snake::new("a", cells(&[(5, 5), (5, 6), (5, 7)]), Direction::Up);
    let chosen = scorer().choose_direction(
        &mut snake,
        &HashSet::new(),
        Cell::new(6, 5),
        &Fruits::new(),
    );
    assert_eq!(chosen, Direction::Right);
}

#[test]
fn test_straight_shot_is_eaten_by_resolver() {
    let mut snakes = vec![Snake::new(
        "a",
        cells(&[(5, 5), (5, 6), (5, 7)]),
        Direction::Up,
    )];
    let mut food = Cell::new(6, 5);
    let mut fruits = Fruits::new();
    let mut rng = StdRng::seed_from_u64(11);

    let state = resolver().step(&mut snakes, &mut food, &mut fruits, &mut rng);

    assert_eq!(state, RoundState::Running);
    assert_eq!(snakes[0].head(), Cell::new(6, 5));
    assert_eq!(snakes[0].score, 1);
    assert_eq!(snakes[0].len(), 4);
    assert_ne!(food, Cell::new(6, 5), "food should respawn");
    assert!(board().in_interior(&food));
    assert!(!snakes[0].body.contains(&food));
}

#[test]
fn test_wall_move_is_never_a_candidate() {
    let snake = Snake::new("a", cells(&[(1, 5)]), Direction::Left);
    let candidates = scorer().candidates(&snake, Cell::new(8, 8), &HashSet::new());

    assert!(candidates.len() <= 3);
    assert_eq!(candidates.len(), 3);
    assert!(candidates.iter().all(|c| c.direction != Direction::Left));
}

#[test]
fn test_own_body_cells_are_filtered() {
    // Down from the head is body[3]
    let snake = Snake::new(
        "a",
        cells(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]),
        Direction::Left,
    );
    let candidates = scorer().candidates(&snake, Cell::new(5, 9), &HashSet::new());

    let body: HashSet<Cell> = snake.body.iter().copied().collect();
    assert!(candidates.iter().all(|c| !body.contains(&c.new_head)));
    assert!(candidates.iter().all(|c| c.direction != Direction::Down));
}

#[test]
fn test_boxed_in_snake_dies_on_own_body() {
    // Head (2,2) arrived from below; up, left and right are all its own body
    let body = cells(&[
        (2, 2),
        (2, 3),
        (3, 3),
        (3, 2),
        (3, 1),
        (2, 1),
        (1, 1),
        (1, 2),
        (1, 3),
    ]);
    let mut snakes = vec![Snake::new("a", body.clone(), Direction::Up)];
    assert!(scorer()
        .candidates(&snakes[0], Cell::new(8, 8), &HashSet::new())
        .is_empty());

    let mut food = Cell::new(8, 8);
    let mut fruits = Fruits::new();
    let mut rng = StdRng::seed_from_u64(5);
    let state = resolver().step(&mut snakes, &mut food, &mut fruits, &mut rng);

    assert_eq!(state, RoundState::Finished);
    assert_eq!(snakes[0].direction, Direction::Up);
    assert_eq!(snakes[0].death_cause, Some(DeathCause::SelfCollision));
    assert_eq!(snakes[0].death_order, Some(1));
    assert_eq!(fruits, body.into_iter().collect::<Fruits>());
}

#[test]
fn test_moving_onto_own_tail_is_fatal() {
    // Tail cell is allowed by the scorer, but the resolver checks the pre-pop body
    let body = cells(&[(5, 5), (6, 5), (6, 6), (5, 6)]);
    let snake = Snake::new("a", body.clone(), Direction::Left);
    let candidates = scorer().candidates(&snake, Cell::new(5, 7), &HashSet::new());
    assert!(candidates.iter().any(|c| c.new_head == Cell::new(5, 6)));

    let mut snakes = vec![snake];
    let mut food = Cell::new(5, 7);
    let mut fruits = Fruits::new();
    let mut rng = StdRng::seed_from_u64(6);
    resolver().step(&mut snakes, &mut food, &mut fruits, &mut rng);

    assert_eq!(snakes[0].direction, Direction::Down);
    assert_eq!(snakes[0].death_cause, Some(DeathCause::SelfCollision));
    assert_eq!(fruits, body.into_iter().collect::<Fruits>());
}

#[test]
fn test_dead_snake_body_becomes_fruit() {
    // A is boxed in by B; B's head is too far from A to reach any fruit this tick
    let a = Snake::new("a", cells(&[(3, 3), (3, 4), (3, 5)]), Direction::Up);
    let b = Snake::new(
        "b",
        cells(&[(5, 3), (4, 3), (4, 2), (3, 2), (2, 2), (2, 3), (2, 4)]),
        Direction::Right,
    );
    let mut snakes = vec![a, b];
    let mut food = Cell::new(9, 9);
    let mut fruits = Fruits::new();
    let mut rng = StdRng::seed_from_u64(2);

    let state = resolver().step(&mut snakes, &mut food, &mut fruits, &mut rng);

    assert_eq!(state, RoundState::Running);
    assert!(!snakes[0].alive);
    assert!(snakes[0].body.is_empty());
    assert_eq!(snakes[0].death_cause, Some(DeathCause::SnakeCollision));
    assert_eq!(
        fruits,
        cells(&[(3, 3), (3, 4), (3, 5)]).into_iter().collect::<Fruits>()
    );
    assert!(snakes[1].alive);
}

#[test]
fn test_survivor_picks_up_dropped_fruit() {
    // A dies first in the tick; B, next in order, steps right onto (3,4)
    let a = Snake::new("a", cells(&[(3, 3), (3, 4), (3, 5)]), Direction::Up);
    let b = Snake::new(
        "b",
        cells(&[(2, 4), (2, 3), (2, 2), (3, 2), (4, 2), (4, 3)]),
        Direction::Down,
    );
    let b_len = b.len();
    let mut snakes = vec![a, b];
    let mut food = Cell::new(9, 9);
    let mut fruits = Fruits::new();
    let mut rng = StdRng::seed_from_u64(3);

    resolver().step(&mut snakes, &mut food, &mut fruits, &mut rng);

    assert!(!snakes[0].alive);
    assert_eq!(snakes[0].death_order, Some(1));

    let b = &snakes[1];
    assert!(b.alive);
    assert_eq!(b.head(), Cell::new(3, 4));
    assert_eq!(b.score, 1);
    assert_eq!(b.len(), b_len + 1);
    assert_eq!(
        fruits,
        cells(&[(3, 3), (3, 5)]).into_iter().collect::<Fruits>()
    );
    assert_eq!(food, Cell::new(9, 9), "food untouched");
}

#[test]
fn test_same_tick_deaths_get_sequential_ranks() {
    // Both snakes face the top wall with their only other exits blocked
    let a = Snake::new("a", cells(&[(1, 1), (2, 1), (2, 2), (1, 2)]), Direction::Up);
    let b = Snake::new(
        "b",
        cells(&[(10, 1), (9, 1), (9, 2), (10, 2)]),
        Direction::Up,
    );
    let mut snakes = vec![a, b];
    let mut food = Cell::new(5, 8);
    let mut fruits = Fruits::new();
    let mut rng = StdRng::seed_from_u64(4);
    let mut resolver = resolver();

    let state = resolver.step(&mut snakes, &mut food, &mut fruits, &mut rng);

    assert_eq!(state, RoundState::Finished);
    assert_eq!(snakes[0].death_order, Some(1));
    assert_eq!(snakes[1].death_order, Some(2));
    assert_eq!(resolver.deaths(), 2);
}

#[test]
fn test_plain_move_keeps_length() {
    let mut snakes = vec![Snake::new(
        "a",
        cells(&[(5, 5), (5, 6), (5, 7)]),
        Direction::Up,
    )];
    let mut food = Cell::new(9, 1);
    let mut fruits = Fruits::new();
    let mut rng = StdRng::seed_from_u64(8);

    resolver().step(&mut snakes, &mut food, &mut fruits, &mut rng);

    assert_eq!(snakes[0].len(), 3);
    assert_eq!(snakes[0].score, 0);
    assert_eq!(food, Cell::new(9, 1));
}

#[test]
#[should_panic]
fn test_food_outside_interior_is_rejected() {
    let mut snakes = vec![Snake::new("a", cells(&[(5, 5)]), Direction::Up)];
    let mut food = Cell::new(0, 0);
    let mut rng = StdRng::seed_from_u64(8);
    resolver().step(&mut snakes, &mut food, &mut Fruits::new(), &mut rng);
}
