mod common;
mod entity;
mod grid;
mod scenario;
mod world;

pub use common::{Action, CellKind, Direction, Position};
pub use entity::Snake;
pub use grid::{Grid, Observation, Row};
pub use scenario::{Scenario, ScenarioError};
pub use world::{DeathReason, Placement, PlacementError, StepOutcome, World, WorldError};
