//! Immutable settings injected into a [`World`](crate::snake::World) at construction.

use thiserror::Error;

use crate::snake::{CellKind, Direction};

/// Longest initial body a world accepts.
pub const MAX_SNAKE_SIZE: usize = u16::MAX as usize;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Snake size must be at least 1")]
    EmptySnake,
    #[error("Snake size {0} exceeds the maximum of 65535")]
    SnakeTooLong(usize),
    #[error("Direction table entry {0} is not a unit cardinal step")]
    InvalidDirection(usize),
    #[error("Direction table must be four distinct clockwise steps")]
    NotClockwise,
    #[error("Cell code {0} is used by more than one cell kind")]
    DuplicateCellCode(u32),
    #[error("Grid {0}x{1} has no interior, need at least 3x3")]
    GridTooSmall(usize, usize),
}

/// Numeric codes used when an observation is rendered for a consumer.
/// The head code is always one above the body code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCodes {
    pub empty: u32,
    pub wall: u32,
    pub food: u32,
    pub snake_body: u32,
}

impl CellCodes {
    pub fn snake_head(&self) -> u32 {
        self.snake_body + 1
    }

    pub fn code(&self, kind: CellKind) -> u32 {
        match kind {
            CellKind::Empty => self.empty,
            CellKind::Wall => self.wall,
            CellKind::Food => self.food,
            CellKind::SnakeBody => self.snake_body,
            CellKind::SnakeHead => self.snake_head(),
        }
    }
}

impl Default for CellCodes {
    fn default() -> Self {
        Self {
            empty: 0,
            wall: 255,
            food: 64,
            snake_body: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewards {
    pub dead: f64,
    pub moved: f64,
    pub eat: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            dead: -1.0,
            moved: 0.0,
            eat: 1.0,
        }
    }
}

/// (row, col) deltas indexed by [`Direction`], ordered clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionTable(pub [(i32, i32); 4]);

impl DirectionTable {
    pub fn delta(&self, direction: Direction) -> (i32, i32) {
        self.0[direction.index()]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (i, &(drow, dcol)) in self.0.iter().enumerate() {
            if drow.abs() + dcol.abs() != 1 {
                return Err(ConfigError::InvalidDirection(i));
            }
        }
        // Each entry must be the previous one rotated a quarter turn clockwise.
        for i in 0..4 {
            let (drow, dcol) = self.0[i];
            if self.0[(i + 1) % 4] != (dcol, -drow) {
                return Err(ConfigError::NotClockwise);
            }
        }
        Ok(())
    }
}

impl Default for DirectionTable {
    fn default() -> Self {
        // up, right, down, left
        Self([(-1, 0), (0, 1), (1, 0), (0, -1)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub cells: CellCodes,
    pub rewards: Rewards,
    pub directions: DirectionTable,
    /// Initial body length, head included.
    pub snake_size: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cells: CellCodes::default(),
            rewards: Rewards::default(),
            directions: DirectionTable::default(),
            snake_size: 3,
        }
    }
}

impl WorldConfig {
    pub fn with_snake_size(mut self, size: usize) -> Self {
        self.snake_size = size;
        self
    }

    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snake_size == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.snake_size > MAX_SNAKE_SIZE {
            return Err(ConfigError::SnakeTooLong(self.snake_size));
        }

        self.directions.validate()?;

        let kinds = [
            CellKind::Empty,
            CellKind::Wall,
            CellKind::Food,
            CellKind::SnakeBody,
            CellKind::SnakeHead,
        ];
        let mut seen = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let code = self.cells.code(kind);
            if seen.contains(&code) {
                return Err(ConfigError::DuplicateCellCode(code));
            }
            seen.push(code);
        }

        Ok(())
    }
}
