use std::fmt;

/// Semantic content of a single grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Wall,
    Food,
    SnakeBody,
    SnakeHead,
}

impl CellKind {
    pub fn symbol(&self) -> char {
        match self {
            CellKind::Empty => ' ',
            CellKind::Wall => 'w',
            CellKind::Food => '*',
            CellKind::SnakeBody => 'o',
            CellKind::SnakeHead => '@',
        }
    }
}

/// Grid coordinate as (row, col). Signed so a step off the board is still representable.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, (drow, dcol): (i32, i32)) -> Self {
        Self::new(self.row + drow, self.col + dcol)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Index into the clockwise direction table (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction(u8);

impl Direction {
    pub const ALL: [Direction; 4] = [Direction(0), Direction(1), Direction(2), Direction(3)];

    /// Wraps any index onto the four cardinal directions.
    pub fn from_index(index: usize) -> Self {
        Direction((index % 4) as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn turn_right(&self) -> Self {
        Direction((self.0 + 1) % 4)
    }

    pub fn turn_left(&self) -> Self {
        Direction((self.0 + 3) % 4)
    }

    pub fn opposite(&self) -> Self {
        Direction((self.0 + 2) % 4)
    }

    pub fn allows(&self, direction: &Self) -> bool {
        *direction != self.opposite()
    }
}

/// Relative steering command. None of them can reverse the snake onto itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Straight,
    TurnLeft,
    TurnRight,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Straight, Action::TurnLeft, Action::TurnRight];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::Straight),
            1 => Some(Action::TurnLeft),
            2 => Some(Action::TurnRight),
            _ => None,
        }
    }

    pub fn apply(&self, direction: Direction) -> Direction {
        match self {
            Action::Straight => direction,
            Action::TurnLeft => direction.turn_left(),
            Action::TurnRight => direction.turn_right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Direction};

    #[test]
    fn test_actions_never_reverse() {
        for direction in Direction::ALL {
            for action in Action::ALL {
                let next = action.apply(direction);
                assert!(direction.allows(&next), "{:?} reversed {:?}", action, direction);
            }
        }
    }

    #[test]
    fn test_turns_are_inverse() {
        let direction = Direction::from_index(1);
        assert_eq!(direction.turn_left().turn_right(), direction);
        assert_eq!(direction.turn_right().turn_right(), direction.opposite());
        assert_eq!(Direction::from_index(3).turn_right().index(), 0);
        assert_eq!(Direction::from_index(0).turn_left().index(), 3);
    }

    #[test]
    fn test_action_from_index() {
        assert_eq!(Action::from_index(0), Some(Action::Straight));
        assert_eq!(Action::from_index(1), Some(Action::TurnLeft));
        assert_eq!(Action::from_index(2), Some(Action::TurnRight));
        assert_eq!(Action::from_index(3), None);
    }
}
