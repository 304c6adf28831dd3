use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::common::{Action, CellKind, Direction, Position};
use super::entity::Snake;
use super::grid::{Grid, Observation};
use crate::configuration::{ConfigError, WorldConfig};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlacementError {
    #[error("No free cell left for food")]
    NoFreeCell,
    #[error("No start position fits a snake of size {0}")]
    NoSnakeSpawn(usize),
    #[error("Food at {requested} is blocked and so are the fallbacks {fallbacks:?}")]
    CustomFoodBlocked {
        requested: Position,
        fallbacks: [Position; 2],
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// How the snake and the food are put on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Random,
    /// Exact start, no bounds validation. Food falls back one row up, then one row up
    /// and one column right, when the requested cell is taken.
    Custom {
        start_position: Position,
        start_direction: Direction,
        food_position: Position,
    },
}

impl Placement {
    pub fn custom(start_position: (i32, i32), start_direction_index: usize, food_position: (i32, i32)) -> Self {
        Placement::Custom {
            start_position: start_position.into(),
            start_direction: Direction::from_index(start_direction_index),
            food_position: food_position.into(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Placement::Custom { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub reward: f64,
    pub done: bool,
    /// Snake body, head first.
    pub body: Vec<Position>,
    pub food_ate: bool,
}

pub struct World {
    config: WorldConfig,
    placement: Placement,
    grid: Grid,
    snake: Snake,
    food_position: Position,
    // non-wall cells, fixed for the lifetime of the world
    available_food_positions: BTreeSet<Position>,
    current_available_food_positions: BTreeSet<Position>,
    death_reason: Option<DeathReason>,
    rng: fastrand::Rng,
}

impl World {
    pub fn new(size: (usize, usize), placement: Placement, config: WorldConfig) -> Result<Self, WorldError> {
        Self::with_rng(size, placement, config, fastrand::Rng::new())
    }

    /// Same as [`World::new`] with a caller supplied, possibly seeded, generator.
    pub fn with_rng(
        size: (usize, usize),
        placement: Placement,
        config: WorldConfig,
        mut rng: fastrand::Rng,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        if size.0 < 3 || size.1 < 3 {
            return Err(ConfigError::GridTooSmall(size.0, size.1).into());
        }

        let grid = Grid::with_walls(size.0, size.1);
        let available_food_positions = grid.open_cells();
        let snake = Self::init_snake(&placement, &config, &available_food_positions, &mut rng)?;

        let food_position = match placement {
            Placement::Custom { food_position, .. } => food_position,
            Placement::Random => snake.head(),
        };

        let mut world = Self {
            config,
            placement,
            grid,
            snake,
            food_position,
            available_food_positions,
            current_available_food_positions: BTreeSet::new(),
            death_reason: None,
            rng,
        };
        world.init_food()?;

        info!(
            "world {}x{} created, snake at {} heading {}, food at {}",
            size.0,
            size.1,
            world.snake.head(),
            world.snake.direction().index(),
            world.food_position
        );

        Ok(world)
    }

    fn init_snake(
        placement: &Placement,
        config: &WorldConfig,
        open: &BTreeSet<Position>,
        rng: &mut fastrand::Rng,
    ) -> Result<Snake, PlacementError> {
        let (start_position, start_direction) = match *placement {
            Placement::Custom {
                start_position,
                start_direction,
                ..
            } => (start_position, start_direction),
            Placement::Random => {
                let candidates: Vec<(Position, Direction)> = open
                    .iter()
                    .flat_map(|p| Direction::ALL.into_iter().map(move |d| (*p, d)))
                    .filter(|(p, d)| {
                        Snake::new(*p, *d, config.snake_size, config.directions)
                            .blocks()
                            .iter()
                            .all(|b| open.contains(b))
                    })
                    .collect();
                if candidates.is_empty() {
                    return Err(PlacementError::NoSnakeSpawn(config.snake_size));
                }
                candidates[rng.usize(0..candidates.len())]
            }
        };

        Ok(Snake::new(
            start_position,
            start_direction,
            config.snake_size,
            config.directions,
        ))
    }

    /// Puts exactly one food cell on the board, away from walls and the snake.
    pub fn init_food(&mut self) -> Result<Position, PlacementError> {
        if self.grid.get(&self.food_position) == Some(CellKind::Food) {
            self.grid.set(&self.food_position, CellKind::Empty);
        }

        self.current_available_food_positions = self
            .available_food_positions
            .iter()
            .filter(|p| !self.snake.occupies(p))
            .copied()
            .collect();

        let chosen_position = if self.placement.is_custom() {
            self.custom_food_position()?
        } else {
            let len = self.current_available_food_positions.len();
            if len == 0 {
                return Err(PlacementError::NoFreeCell);
            }
            let index = self.rng.usize(0..len);
            self.current_available_food_positions
                .iter()
                .nth(index)
                .copied()
                .ok_or(PlacementError::NoFreeCell)?
        };

        self.current_available_food_positions.remove(&chosen_position);
        self.grid.set(&chosen_position, CellKind::Food);
        self.food_position = chosen_position;
        debug!("food placed at {}", chosen_position);

        Ok(chosen_position)
    }

    // The request is the last food position, so after an eat it is the cell under the head.
    fn custom_food_position(&self) -> Result<Position, PlacementError> {
        let requested = self.food_position;
        if self.current_available_food_positions.contains(&requested) {
            return Ok(requested);
        }

        let fallbacks = [requested.offset((-1, 0)), requested.offset((-1, 1))];
        match fallbacks
            .iter()
            .find(|p| self.current_available_food_positions.contains(*p))
        {
            Some(position) => {
                warn!("food at {} is blocked, using {}", requested, position);
                Ok(*position)
            }
            None => Err(PlacementError::CustomFoodBlocked {
                requested,
                fallbacks,
            }),
        }
    }

    /// Copy of the board with the snake drawn on it while it is alive.
    pub fn get_observation(&self) -> Observation {
        let mut grid = self.grid.clone();
        if self.snake.alive {
            for block in self.snake.blocks() {
                grid.set(block, CellKind::SnakeBody);
            }
            grid.set(&self.snake.head(), CellKind::SnakeHead);
        }
        Observation::new(grid)
    }

    pub fn move_snake(&mut self, action: Action) -> Result<StepOutcome, WorldError> {
        if !self.snake.alive {
            return Ok(StepOutcome {
                reward: 0.0,
                done: true,
                body: self.body(),
                food_ate: false,
            });
        }

        let mut reward = 0.0;
        let mut new_food_needed = false;

        let (new_snake_head, old_snake_tail) = self.snake.step(action);
        debug!("{:?} moves head to {}", action, new_snake_head);

        if self.grid.is_wall(&new_snake_head) {
            self.kill(DeathReason::WallCollision);
        } else if self.snake.bites_itself() {
            self.kill(DeathReason::SelfCollision);
        }

        if self.snake.alive && new_snake_head == self.food_position {
            self.grid.set(&self.food_position, CellKind::Empty);
            self.snake.grow(old_snake_tail);
            new_food_needed = true;
            reward = self.config.rewards.eat;
        } else if self.snake.alive {
            reward = self.config.rewards.moved;
        }

        let done = !self.snake.alive;
        if done {
            reward = self.config.rewards.dead;
        }

        if new_food_needed {
            self.init_food()?;
        }

        Ok(StepOutcome {
            reward,
            done,
            body: self.body(),
            food_ate: new_food_needed,
        })
    }

    fn kill(&mut self, reason: DeathReason) {
        info!(
            "snake died at {} ({:?}), length {}",
            self.snake.head(),
            reason,
            self.snake.len()
        );
        self.snake.alive = false;
        self.death_reason = Some(reason);
    }

    fn body(&self) -> Vec<Position> {
        self.snake.blocks().iter().copied().collect()
    }

    /// (rows, cols)
    pub fn size(&self) -> (usize, usize) {
        self.grid.dimension()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food_position(&self) -> Position {
        self.food_position
    }

    pub fn is_alive(&self) -> bool {
        self.snake.alive
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Cells that could take food right now: not a wall, not the snake, not the food.
    pub fn available_food_positions(&self) -> &BTreeSet<Position> {
        &self.current_available_food_positions
    }
}
