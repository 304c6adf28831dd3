use std::str::FromStr;

use thiserror::Error;

use super::common::{Direction, Position};
use super::world::{Placement, World, WorldError};
use crate::configuration::WorldConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Missing {0} line")]
    MissingLine(&'static str),
    #[error("Line {line}: expected `a,b` pair, got {text:?}")]
    InvalidPair { line: usize, text: String },
    #[error("Line {line}: direction must be 0..=3, got {text:?}")]
    InvalidDirection { line: usize, text: String },
    #[error("Unexpected trailing line {0}")]
    TrailingLine(usize),
}

/// Fixed start for a custom world, in text form:
///
/// ```text
/// # rows,cols
/// 5,5
/// # head row,col
/// 2,2
/// # direction index
/// 0
/// # food row,col
/// 2,2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub size: (usize, usize),
    pub start_position: Position,
    pub start_direction: Direction,
    pub food_position: Position,
}

impl Scenario {
    pub fn placement(&self) -> Placement {
        Placement::Custom {
            start_position: self.start_position,
            start_direction: self.start_direction,
            food_position: self.food_position,
        }
    }

    pub fn into_world(self, config: WorldConfig) -> Result<World, WorldError> {
        World::new(self.size, self.placement(), config)
    }

    pub fn into_world_with_rng(self, config: WorldConfig, rng: fastrand::Rng) -> Result<World, WorldError> {
        World::with_rng(self.size, self.placement(), config, rng)
    }
}

fn parse_pair<T: FromStr>((line, text): (usize, &str)) -> Result<(T, T), ScenarioError> {
    let invalid = || ScenarioError::InvalidPair {
        line,
        text: text.to_string(),
    };
    let (a, b) = text.split_once(',').ok_or_else(invalid)?;
    let a = a.trim().parse().map_err(|_| invalid())?;
    let b = b.trim().parse().map_err(|_| invalid())?;
    Ok((a, b))
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

        let size = parse_pair(lines.next().ok_or(ScenarioError::MissingLine("size"))?)?;
        let start: (i32, i32) = parse_pair(lines.next().ok_or(ScenarioError::MissingLine("start"))?)?;

        let (line, text) = lines.next().ok_or(ScenarioError::MissingLine("direction"))?;
        let direction = match text.parse::<usize>() {
            Ok(index) if index < 4 => Direction::from_index(index),
            _ => {
                return Err(ScenarioError::InvalidDirection {
                    line,
                    text: text.to_string(),
                })
            }
        };

        let food: (i32, i32) = parse_pair(lines.next().ok_or(ScenarioError::MissingLine("food"))?)?;

        if let Some((line, _)) = lines.next() {
            return Err(ScenarioError::TrailingLine(line));
        }

        Ok(Self {
            size,
            start_position: start.into(),
            start_direction: direction,
            food_position: food.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::{Action, CellKind};

    fn create_scenario() -> Scenario {
        let s = r#"
# rows,cols
7,9
3,4
# heading right
1
3,6"#;
        s.parse().unwrap()
    }

    #[test]
    fn test_parse() {
        let scenario = create_scenario();
        assert_eq!(scenario.size, (7, 9));
        assert_eq!(scenario.start_position, Position::new(3, 4));
        assert_eq!(scenario.start_direction.index(), 1);
        assert_eq!(scenario.food_position, Position::new(3, 6));
    }

    #[test]
    fn test_scenario_world_plays() {
        let mut world = create_scenario()
            .into_world(WorldConfig::default())
            .unwrap();
        assert_eq!(world.get_observation().cell(&Position::new(3, 2)), Some(CellKind::SnakeBody));

        let outcome = world.move_snake(Action::Straight).unwrap();
        assert!(!outcome.food_ate);
        let outcome = world.move_snake(Action::Straight).unwrap();
        assert!(outcome.food_ate);
        assert_eq!(outcome.body.len(), 4);
        // the head now covers (3, 6), one row up is free
        assert_eq!(world.food_position(), Position::new(2, 6));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "5,5\n2,2\n0".parse::<Scenario>(),
            Err(ScenarioError::MissingLine("food"))
        );
        assert_eq!(
            "5;5\n2,2\n0\n1,1".parse::<Scenario>(),
            Err(ScenarioError::InvalidPair {
                line: 1,
                text: "5;5".to_string()
            })
        );
        assert_eq!(
            "5,5\n2,2\n\n4\n1,1".parse::<Scenario>(),
            Err(ScenarioError::InvalidDirection {
                line: 4,
                text: "4".to_string()
            })
        );
        assert_eq!(
            "5,5\n2,2\n0\n1,1\n1,1".parse::<Scenario>(),
            Err(ScenarioError::TrailingLine(5))
        );
        assert!("-5,5\n2,2\n0\n1,1".parse::<Scenario>().is_err());
    }
}
