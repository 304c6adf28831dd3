use std::collections::VecDeque;

use super::common::{Action, Direction, Position};
use crate::configuration::DirectionTable;

#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    directions: DirectionTable,
    pub alive: bool,
}

impl Snake {
    /// Lays `size` segments out behind `head`, opposite to `direction`.
    /// `size` is bounded by [`WorldConfig::validate`](crate::WorldConfig::validate).
    pub fn new(head: Position, direction: Direction, size: usize, directions: DirectionTable) -> Self {
        let (drow, dcol) = directions.delta(direction);
        let len = i32::try_from(size.max(1)).unwrap_or(i32::MAX);
        let body = (0..len)
            .map(|i| Position::new(head.row - drow * i, head.col - dcol * i))
            .collect();

        Self {
            body,
            direction,
            directions,
            alive: true,
        }
    }

    /// Turns according to `action`, pushes the new head and drops the tail.
    /// Returns (new head, removed tail) so the caller can grow the snake back.
    pub fn step(&mut self, action: Action) -> (Position, Position) {
        self.direction = action.apply(self.direction);

        let new_head = self.head().offset(self.directions.delta(self.direction));
        self.body.push_front(new_head);

        // body has at least two segments here
        let old_tail = self.body.pop_back().unwrap_or(new_head);
        (new_head, old_tail)
    }

    pub fn grow(&mut self, tail: Position) {
        self.body.push_back(tail);
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn blocks(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, position: &Position) -> bool {
        self.body.contains(position)
    }

    /// Head sits on one of the trailing segments.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|p| *p == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_snake() -> Snake {
        // facing up (-1, 0), body trails downwards
        Snake::new(
            Position::new(3, 3),
            Direction::from_index(0),
            3,
            DirectionTable::default(),
        )
    }

    #[test]
    fn test_new_lays_body_behind_head() {
        let snake = create_snake();
        assert_eq!(
            snake.blocks().iter().copied().collect::<Vec<_>>(),
            vec![Position::new(3, 3), Position::new(4, 3), Position::new(5, 3)]
        );
        assert!(snake.alive);
    }

    #[test]
    fn test_step_returns_head_and_tail() {
        let mut snake = create_snake();

        let (head, tail) = snake.step(Action::Straight);
        assert_eq!(head, Position::new(2, 3));
        assert_eq!(tail, Position::new(5, 3));
        assert_eq!(snake.len(), 3);

        let (head, tail) = snake.step(Action::TurnRight);
        assert_eq!(head, Position::new(2, 4));
        assert_eq!(tail, Position::new(4, 3));
        assert_eq!(snake.direction().index(), 1);

        let (head, _) = snake.step(Action::TurnLeft);
        assert_eq!(head, Position::new(1, 4));
        assert_eq!(snake.direction().index(), 0);
    }

    #[test]
    fn test_grow_restores_tail() {
        let mut snake = create_snake();
        let (_, tail) = snake.step(Action::Straight);
        snake.grow(tail);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.blocks().back(), Some(&Position::new(5, 3)));
    }

    #[test]
    fn test_single_segment_snake_moves() {
        let mut snake = Snake::new(
            Position::new(2, 2),
            Direction::from_index(1),
            1,
            DirectionTable::default(),
        );
        let (head, tail) = snake.step(Action::Straight);
        assert_eq!(head, Position::new(2, 3));
        assert_eq!(tail, Position::new(2, 2));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_bites_itself() {
        let mut snake = Snake::new(
            Position::new(3, 3),
            Direction::from_index(0),
            5,
            DirectionTable::default(),
        );
        snake.step(Action::TurnRight);
        snake.step(Action::TurnRight);
        assert!(!snake.bites_itself());
        snake.step(Action::TurnRight);
        assert!(snake.bites_itself());
    }
}
