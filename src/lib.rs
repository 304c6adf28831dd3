//! Snake on a walled grid, stepped one action at a time for reinforcement learning.
//!
//! A [`World`] owns the board, the snake and the single food cell. Agents read
//! [`World::get_observation`] and drive it with [`World::move_snake`].

pub mod configuration;
pub mod logging;
pub mod snake;

pub use configuration::{CellCodes, ConfigError, DirectionTable, Rewards, WorldConfig};
pub use snake::{
    Action, CellKind, DeathReason, Direction, Observation, Placement, PlacementError, Position,
    Scenario, StepOutcome, World, WorldError,
};
