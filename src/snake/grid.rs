use std::{collections::BTreeSet, fmt, ops::Deref};

use super::common::{CellKind, Position};
use crate::configuration::CellCodes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<CellKind>,
}
impl Deref for Row {
    type Target = Vec<CellKind>;

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

/// Fixed size board of typed cells, indexed by (row, col).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
    dimension: (usize, usize),
}
impl Deref for Grid {
    type Target = Vec<Row>;

    fn deref(&self) -> &Self::Target {
        &self.rows
    }
}

impl Grid {
    /// Empty interior surrounded on all four edges by walls.
    pub fn with_walls(rows: usize, cols: usize) -> Self {
        let rows_vec = (0..rows)
            .map(|r| Row {
                cells: (0..cols)
                    .map(|c| {
                        if r == 0 || c == 0 || r + 1 == rows || c + 1 == cols {
                            CellKind::Wall
                        } else {
                            CellKind::Empty
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            rows: rows_vec,
            dimension: (rows, cols),
        }
    }

    /// (rows, cols)
    pub fn dimension(&self) -> (usize, usize) {
        self.dimension
    }

    fn index(&self, position: &Position) -> Option<(usize, usize)> {
        if position.row < 0 || position.col < 0 {
            return None;
        }
        let (row, col) = (position.row as usize, position.col as usize);
        if row >= self.dimension.0 || col >= self.dimension.1 {
            return None;
        }
        Some((row, col))
    }

    pub fn get(&self, position: &Position) -> Option<CellKind> {
        self.index(position).map(|(row, col)| self.rows[row].cells[col])
    }

    /// Returns false when the position lies outside the board.
    pub fn set(&mut self, position: &Position, kind: CellKind) -> bool {
        match self.index(position) {
            Some((row, col)) => {
                self.rows[row].cells[col] = kind;
                true
            }
            None => false,
        }
    }

    /// Out of the board counts as wall.
    pub fn is_wall(&self, position: &Position) -> bool {
        !matches!(self.get(position), Some(kind) if kind != CellKind::Wall)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (rows, cols) = self.dimension;
        (0..rows).flat_map(move |r| (0..cols).map(move |c| Position::new(r as i32, c as i32)))
    }

    pub fn open_cells(&self) -> BTreeSet<Position> {
        self.positions().filter(|p| !self.is_wall(p)).collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|c| **c == kind).count())
            .sum()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(CellKind::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Detached snapshot of the board with the snake drawn on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    grid: Grid,
}

impl Observation {
    pub(crate) fn new(grid: Grid) -> Self {
        Self { grid }
    }

    pub fn dimension(&self) -> (usize, usize) {
        self.grid.dimension()
    }

    pub fn cell(&self, position: &Position) -> Option<CellKind> {
        self.grid.get(position)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.grid.count(kind)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Numeric rows × cols rendering for agents.
    pub fn to_codes(&self, codes: &CellCodes) -> Vec<Vec<f64>> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|kind| codes.code(*kind) as f64).collect())
            .collect()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_only_on_border() {
        let grid = Grid::with_walls(4, 6);
        for position in grid.positions() {
            let border = position.row == 0 || position.row == 3 || position.col == 0 || position.col == 5;
            assert_eq!(grid.get(&position) == Some(CellKind::Wall), border, "{}", position);
        }
        assert_eq!(grid.open_cells().len(), 2 * 4);
    }

    #[test]
    fn test_out_of_board_is_wall() {
        let mut grid = Grid::with_walls(3, 3);
        assert!(grid.is_wall(&Position::new(-1, 1)));
        assert!(grid.is_wall(&Position::new(1, 3)));
        assert!(!grid.is_wall(&Position::new(1, 1)));
        assert!(!grid.set(&Position::new(3, 0), CellKind::Food));
        assert_eq!(grid.get(&Position::new(3, 0)), None);
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::with_walls(3, 4);
        grid.set(&Position::new(1, 2), CellKind::Food);
        assert_eq!(grid.to_string(), "wwww\nw *w\nwwww\n");
    }

    #[test]
    fn test_codes() {
        let mut grid = Grid::with_walls(3, 3);
        grid.set(&Position::new(1, 1), CellKind::SnakeHead);
        let codes = Observation::new(grid).to_codes(&CellCodes::default());
        assert_eq!(codes[0], vec![255.0, 255.0, 255.0]);
        assert_eq!(codes[1], vec![255.0, 101.0, 255.0]);
    }
}
