//! Level file model.
//!
//! A level on disk is a flat list of per-cell records plus dimensions,
//! mode, endpoints and element records. Field names follow the level files
//! the game already ships (`cellsSerialized`, `WallRight`, …) so existing
//! files load unchanged. The flat list only exists here: [`Level`] holds a
//! [`Grid`] and conversion happens once, on load or save.

use crate::constants::modes;
use crate::elements::ElementData;
use crate::grid::{Cell, Coord, Grid};
use serde::{Deserialize, Serialize};

/// Level game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum GameMode {
    #[default]
    Relax,
    Challenge,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Relax => modes::RELAX,
            GameMode::Challenge => modes::CHALLENGE,
        }
    }

    /// Unknown or empty mode names fall back to `Relax`.
    pub fn from_name(name: &str) -> Self {
        match name {
            modes::CHALLENGE => GameMode::Challenge,
            _ => GameMode::Relax,
        }
    }
}

/// `{x, y}` point; `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl From<Coord> for GridPoint {
    fn from(c: Coord) -> Self {
        Self {
            x: c.row as i32,
            y: c.col as i32,
        }
    }
}

/// One cell as stored in a level file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "IsVisited", default)]
    pub is_visited: bool,
    #[serde(rename = "WallRight")]
    pub wall_right: bool,
    #[serde(rename = "WallFront")]
    pub wall_front: bool,
    #[serde(rename = "WallLeft")]
    pub wall_left: bool,
    #[serde(rename = "WallBack")]
    pub wall_back: bool,
    #[serde(rename = "IsGoal", default)]
    pub is_goal: bool,
    #[serde(rename = "IsStart", default)]
    pub is_start: bool,
}

impl CellRecord {
    fn new(coord: Coord, cell: &Cell) -> Self {
        Self {
            x: coord.row as i32,
            y: coord.col as i32,
            is_visited: cell.is_visited,
            wall_right: cell.wall_east,
            wall_front: cell.wall_south,
            wall_left: cell.wall_west,
            wall_back: cell.wall_north,
            is_goal: cell.is_goal,
            is_start: cell.is_start,
        }
    }

    fn to_cell(self) -> Cell {
        Cell {
            wall_north: self.wall_back,
            wall_east: self.wall_right,
            wall_south: self.wall_front,
            wall_west: self.wall_left,
            is_start: self.is_start,
            is_goal: self.is_goal,
            is_visited: self.is_visited,
        }
    }
}

/// Serialized level layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub mode: String,
    pub rows: i32,
    pub columns: i32,
    #[serde(rename = "cellsSerialized", default)]
    pub cells: Vec<CellRecord>,
    #[serde(default)]
    pub start: Option<GridPoint>,
    #[serde(default)]
    pub end: Option<GridPoint>,
    #[serde(default)]
    pub elements: Vec<ElementData>,
}

/// Level file conversion error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    InvalidDimensions { rows: i32, columns: i32 },
    CellCountMismatch { expected: usize, found: usize },
    RecordOutOfRange { x: i32, y: i32 },
    DuplicateRecord { x: i32, y: i32 },
    NegativePoint(GridPoint),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::InvalidDimensions { rows, columns } => write!(
                f,
                "Invalid maze dimensions: rows={}, columns={}",
                rows, columns
            ),
            LevelError::CellCountMismatch { expected, found } => write!(
                f,
                "Invalid cell list: expected {} records, got {}",
                expected, found
            ),
            LevelError::RecordOutOfRange { x, y } => {
                write!(f, "Cell record ({}, {}) is outside the maze", x, y)
            }
            LevelError::DuplicateRecord { x, y } => {
                write!(f, "Cell record ({}, {}) appears more than once", x, y)
            }
            LevelError::NegativePoint(p) => {
                write!(f, "Start/end point ({}, {}) has a negative coordinate", p.x, p.y)
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// A loaded level: the maze itself plus the data riding along with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub mode: GameMode,
    pub grid: Grid,
    pub elements: Vec<ElementData>,
}

impl Level {
    pub fn new(grid: Grid) -> Self {
        Self {
            mode: GameMode::Relax,
            grid,
            elements: Vec::new(),
        }
    }

    /// Flatten into the on-disk layout.
    pub fn to_file(&self) -> LevelFile {
        let grid = &self.grid;
        let cells = grid
            .coords()
            .filter_map(|c| grid.cell(c).map(|cell| CellRecord::new(c, cell)))
            .collect();
        LevelFile {
            mode: self.mode.as_str().to_string(),
            rows: grid.rows as i32,
            columns: grid.cols as i32,
            cells,
            start: grid.start.map(GridPoint::from),
            end: grid.end.map(GridPoint::from),
            elements: self.elements.clone(),
        }
    }

    /// Rebuild a level from its on-disk layout.
    ///
    /// Rejects files whose record list cannot fill the grid exactly.
    /// Endpoints are kept as stored (even out of range) so the validator
    /// can report them.
    pub fn from_file(file: LevelFile) -> Result<Self, LevelError> {
        if file.rows <= 0 || file.columns <= 0 {
            return Err(LevelError::InvalidDimensions {
                rows: file.rows,
                columns: file.columns,
            });
        }
        let rows = file.rows as usize;
        let cols = file.columns as usize;
        let expected = rows * cols;
        if file.cells.len() != expected {
            return Err(LevelError::CellCountMismatch {
                expected,
                found: file.cells.len(),
            });
        }

        let mut grid = Grid::new(rows, cols);
        let mut seen = vec![false; expected];
        for record in &file.cells {
            if record.x < 0 || record.y < 0 {
                return Err(LevelError::RecordOutOfRange {
                    x: record.x,
                    y: record.y,
                });
            }
            let coord = Coord::new(record.x as usize, record.y as usize);
            let Some(index) = grid.index_of(coord) else {
                return Err(LevelError::RecordOutOfRange {
                    x: record.x,
                    y: record.y,
                });
            };
            if std::mem::replace(&mut seen[index], true) {
                return Err(LevelError::DuplicateRecord {
                    x: record.x,
                    y: record.y,
                });
            }
            grid.cells[index] = record.to_cell();
        }

        grid.start = file.start.map(point_to_coord).transpose()?;
        grid.end = file.end.map(point_to_coord).transpose()?;

        Ok(Self {
            mode: GameMode::from_name(&file.mode),
            grid,
            elements: file.elements,
        })
    }
}

fn point_to_coord(p: GridPoint) -> Result<Coord, LevelError> {
    if p.x < 0 || p.y < 0 {
        Err(LevelError::NegativePoint(p))
    } else {
        Ok(Coord::new(p.x as usize, p.y as usize))
    }
}
