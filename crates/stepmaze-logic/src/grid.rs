//! Maze grid model.
//!
//! A `Grid` is a flat row-major array of `Cell`s addressed by `Coord`.
//! Every wall between two neighbouring cells is stored twice (once on each
//! face), so all mutation goes through [`Grid::set_wall`], which keeps both
//! faces in agreement.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A cell position. `row` grows southwards, `col` grows eastwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four wall faces of a cell.
///
/// In level files `North` is stored as `WallBack`, `East` as `WallRight`,
/// `South` as `WallFront` and `West` as `WallLeft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Neighbour scan order used by every search in this crate.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// (row, col) step taken when moving through this face.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

/// A single maze cell: four wall flags plus marker flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub wall_north: bool,
    pub wall_east: bool,
    pub wall_south: bool,
    pub wall_west: bool,
    pub is_start: bool,
    pub is_goal: bool,
    pub is_visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            wall_north: true,
            wall_east: true,
            wall_south: true,
            wall_west: true,
            is_start: false,
            is_goal: false,
            is_visited: false,
        }
    }
}

impl Cell {
    pub fn wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.wall_north,
            Direction::East => self.wall_east,
            Direction::South => self.wall_south,
            Direction::West => self.wall_west,
        }
    }

    /// Set a single face. Does not touch the neighbour; see [`Grid::set_wall`].
    pub fn set_wall(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::North => self.wall_north = present,
            Direction::East => self.wall_east = present,
            Direction::South => self.wall_south = present,
            Direction::West => self.wall_west = present,
        }
    }

    pub fn wall_count(&self) -> usize {
        Direction::ALL.iter().filter(|&&d| self.wall(d)).count()
    }

    /// True when all four faces are open.
    pub fn is_open(&self) -> bool {
        self.wall_count() == 0
    }
}

/// The four grid corners. Start and goal always sit on opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Diagonally opposite corner.
    pub fn opposite(self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// Cell position of this corner in a `rows × cols` grid (both ≥ 1).
    pub fn coord(self, rows: usize, cols: usize) -> Coord {
        let last_row = rows.saturating_sub(1);
        let last_col = cols.saturating_sub(1);
        match self {
            Corner::TopLeft => Coord::new(0, 0),
            Corner::TopRight => Coord::new(0, last_col),
            Corner::BottomLeft => Coord::new(last_row, 0),
            Corner::BottomRight => Coord::new(last_row, last_col),
        }
    }

    /// Which corner `coord` is, if any. Checked in `ALL` order, so on
    /// degenerate one-row or one-column grids the first match wins.
    pub fn of(coord: Coord, rows: usize, cols: usize) -> Option<Corner> {
        if rows == 0 || cols == 0 {
            return None;
        }
        Corner::ALL
            .into_iter()
            .find(|c| c.coord(rows, cols) == coord)
    }
}

/// Errors from grid queries and mutations on malformed or out-of-range input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The cell array does not hold `rows * cols` cells.
    MalformedGrid { expected: usize, found: usize },
    /// A coordinate outside the grid.
    OutOfBounds(Coord),
    /// The grid has no start point.
    MissingStart,
    /// The grid has no end point.
    MissingEnd,
    /// Outer boundary walls cannot be toggled.
    BorderWall { at: Coord, direction: Direction },
    /// The start point must sit on a corner.
    StartNotCorner(Coord),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::MalformedGrid { expected, found } => write!(
                f,
                "Malformed grid: expected {} cells, found {}",
                expected, found
            ),
            GridError::OutOfBounds(c) => write!(f, "Coordinate {} is outside the grid", c),
            GridError::MissingStart => write!(f, "Grid has no start point"),
            GridError::MissingEnd => write!(f, "Grid has no end point"),
            GridError::BorderWall { at, direction } => {
                write!(f, "Cannot toggle border wall {:?} of cell {}", direction, at)
            }
            GridError::StartNotCorner(c) => write!(f, "Start point {} is not a corner", c),
        }
    }
}

impl std::error::Error for GridError {}

/// A `rows × cols` maze.
///
/// Fields are public so file loaders and tests can build arbitrary (even
/// malformed) grids; the validator and pathfinder check the shape before
/// indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` long.
    pub cells: Vec<Cell>,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
}

impl Grid {
    /// A fully walled grid with no start or end.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            start: None,
            end: None,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Ok when the cell array matches the stated dimensions.
    pub fn check_shape(&self) -> Result<(), GridError> {
        let expected = self.cell_count();
        if self.cells.len() == expected {
            Ok(())
        } else {
            Err(GridError::MalformedGrid {
                expected,
                found: self.cells.len(),
            })
        }
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Flat index of `coord`, or `None` when outside the grid.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }

    /// Inverse of [`Grid::index_of`].
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index_of(coord).and_then(|i| self.cells.get(i))
    }

    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        match self.index_of(coord) {
            Some(i) => self.cells.get_mut(i),
            None => None,
        }
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }

    /// The in-bounds cell across `direction`, ignoring walls.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// True when `coord` can step through `direction` into another cell.
    pub fn is_passable(&self, coord: Coord, direction: Direction) -> bool {
        match (self.cell(coord), self.neighbor(coord, direction)) {
            (Some(cell), Some(_)) => !cell.wall(direction),
            _ => false,
        }
    }

    /// Cells reachable in one step, in `Direction::ALL` order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            if self.is_passable(coord, d) {
                self.neighbor(coord, d)
            } else {
                None
            }
        })
    }

    /// Add or remove the wall on `direction` of `coord`, updating the
    /// neighbour's opposing face too.
    pub fn set_wall(
        &mut self,
        coord: Coord,
        direction: Direction,
        present: bool,
    ) -> Result<(), GridError> {
        self.check_shape()?;
        if !self.in_bounds(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        let Some(other) = self.neighbor(coord, direction) else {
            return Err(GridError::BorderWall {
                at: coord,
                direction,
            });
        };
        self[coord].set_wall(direction, present);
        self[other].set_wall(direction.opposite(), present);
        Ok(())
    }

    /// Move the start flag to `coord`. Does not touch the goal.
    pub fn set_start(&mut self, coord: Coord) -> Result<(), GridError> {
        self.check_shape()?;
        if !self.in_bounds(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        for cell in &mut self.cells {
            cell.is_start = false;
        }
        self[coord].is_start = true;
        self.start = Some(coord);
        Ok(())
    }

    /// Move the goal flag to `coord`.
    pub fn set_end(&mut self, coord: Coord) -> Result<(), GridError> {
        self.check_shape()?;
        if !self.in_bounds(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        self.clear_goal_flags();
        self[coord].is_goal = true;
        self.end = Some(coord);
        Ok(())
    }

    pub fn clear_goal_flags(&mut self) {
        for cell in &mut self.cells {
            cell.is_goal = false;
        }
    }

    pub fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.is_visited = false;
        }
    }

    /// Number of removable walls: `rows*(cols-1) + cols*(rows-1)`.
    pub fn internal_edge_count(&self) -> usize {
        self.rows * self.cols.saturating_sub(1) + self.cols * self.rows.saturating_sub(1)
    }

    /// Internal walls still present, each counted once (south faces above
    /// the last row, east faces left of the last column). Cells missing
    /// from a malformed grid count as having no walls.
    pub fn internal_wall_count(&self) -> usize {
        let mut count = 0;
        for coord in self.coords() {
            let Some(cell) = self.cell(coord) else {
                continue;
            };
            if coord.row + 1 < self.rows && cell.wall_south {
                count += 1;
            }
            if coord.col + 1 < self.cols && cell.wall_east {
                count += 1;
            }
        }
        count
    }

    /// Cells with no walls on any face.
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Faces whose neighbour disagrees about the shared wall. Each broken
    /// pair is reported once, from its north/west cell.
    pub fn asymmetric_walls(&self) -> Vec<(Coord, Direction)> {
        let mut broken = Vec::new();
        if self.check_shape().is_err() {
            return broken;
        }
        for coord in self.coords() {
            for direction in [Direction::East, Direction::South] {
                if let Some(other) = self.neighbor(coord, direction) {
                    if self[coord].wall(direction) != self[other].wall(direction.opposite()) {
                        broken.push((coord, direction));
                    }
                }
            }
        }
        broken
    }

    pub fn has_symmetric_walls(&self) -> bool {
        self.check_shape().is_ok() && self.asymmetric_walls().is_empty()
    }
}

impl Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        assert!(self.in_bounds(coord), "coordinate {} outside grid", coord);
        &self.cells[coord.row * self.cols + coord.col]
    }
}

impl IndexMut<Coord> for Grid {
    fn index_mut(&mut self, coord: Coord) -> &mut Cell {
        assert!(self.in_bounds(coord), "coordinate {} outside grid", coord);
        &mut self.cells[coord.row * self.cols + coord.col]
    }
}
