//! Structural validation for maze grids.
//!
//! Pure functions that take a grid and return the first rule it breaks.
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. square
//! 2. size range and cell count
//! 3. start/end placement
//! 4. internal wall percentage
//! 5. open-cell cap
//! 6. path length and turns (full validation only)
//! 7. every cell reachable from the start

use crate::config::ValidationRules;
use crate::grid::{Direction, Grid, GridError};
use crate::pathfinding::{self, Path};

/// How much of the rule set to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Skips the path length and turn rule. Used when loading custom levels
    /// and for the editor's solution hint.
    Quick,
    /// Every rule.
    #[default]
    Full,
}

/// Why a maze was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    NotSquare { rows: usize, cols: usize },
    SizeOutOfRange { rows: usize, cols: usize, min: usize, max: usize },
    CellCountMismatch { expected: usize, found: usize },
    InvalidStartOrEnd,
    /// Walls that must be added to reach the floor.
    NotEnoughWalls { needed: usize },
    /// Walls that must be removed to reach the ceiling.
    TooManyWalls { excess: usize },
    TooManyOpenCells { found: usize, max: usize },
    NoPath,
    PathTooShort { length: usize, required: usize },
    InsufficientTurns { turns: usize, required: usize },
    CellsInaccessible { unreachable: usize },
}

impl ValidationFailure {
    /// Short machine-friendly rule name.
    pub fn category(&self) -> &'static str {
        match self {
            ValidationFailure::NotSquare { .. } => "square",
            ValidationFailure::SizeOutOfRange { .. }
            | ValidationFailure::CellCountMismatch { .. } => "size",
            ValidationFailure::InvalidStartOrEnd => "start_end",
            ValidationFailure::NotEnoughWalls { .. } | ValidationFailure::TooManyWalls { .. } => {
                "wall_count"
            }
            ValidationFailure::TooManyOpenCells { .. } => "open_cells",
            ValidationFailure::NoPath
            | ValidationFailure::PathTooShort { .. }
            | ValidationFailure::InsufficientTurns { .. } => "path",
            ValidationFailure::CellsInaccessible { .. } => "accessibility",
        }
    }

    /// Signed wall adjustment that would fix a wall-count failure:
    /// positive to add walls, negative to remove them, zero otherwise.
    pub fn wall_delta(&self) -> i64 {
        match self {
            ValidationFailure::NotEnoughWalls { needed } => *needed as i64,
            ValidationFailure::TooManyWalls { excess } => -(*excess as i64),
            _ => 0,
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::NotSquare { rows, cols } => write!(
                f,
                "Maze must be square (rows must equal columns), got {}x{}",
                rows, cols
            ),
            ValidationFailure::SizeOutOfRange {
                rows,
                cols,
                min,
                max,
            } => write!(
                f,
                "Maze size out of range! Must be between {min}x{min} and {max}x{max}, got {}x{}",
                rows, cols
            ),
            ValidationFailure::CellCountMismatch { expected, found } => write!(
                f,
                "Invalid maze data! Cell count does not match dimensions ({} expected, {} found)",
                expected, found
            ),
            ValidationFailure::InvalidStartOrEnd => write!(f, "Invalid start or end placement"),
            ValidationFailure::NotEnoughWalls { needed } => {
                write!(f, "Not enough walls, add at least {}", needed)
            }
            ValidationFailure::TooManyWalls { excess } => {
                write!(f, "Too many walls, remove at least {}", excess)
            }
            ValidationFailure::TooManyOpenCells { found, max } => write!(
                f,
                "Too many cells with no walls ({} found, at most {})",
                found, max
            ),
            ValidationFailure::NoPath => write!(f, "No valid path from start to end"),
            ValidationFailure::PathTooShort { length, required } => write!(
                f,
                "Insufficient path length ({} cells, at least {})",
                length, required
            ),
            ValidationFailure::InsufficientTurns { turns, required } => write!(
                f,
                "Insufficient turns in the path ({} turns, at least {})",
                turns, required
            ),
            ValidationFailure::CellsInaccessible { unreachable } => write!(
                f,
                "Not all cells are accessible from the start ({} unreachable)",
                unreachable
            ),
        }
    }
}

impl std::error::Error for ValidationFailure {}

impl From<GridError> for ValidationFailure {
    fn from(e: GridError) -> Self {
        match e {
            GridError::MalformedGrid { expected, found } => {
                ValidationFailure::CellCountMismatch { expected, found }
            }
            _ => ValidationFailure::InvalidStartOrEnd,
        }
    }
}

/// A maze that passed validation, with its solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMaze {
    pub solution: Path,
}

pub type ValidationResult = Result<ValidMaze, ValidationFailure>;

/// Internal wall statistics used by the wall-count rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallStats {
    pub walls: usize,
    pub total: usize,
}

impl WallStats {
    pub fn of(grid: &Grid) -> Self {
        Self {
            walls: grid.internal_wall_count(),
            total: grid.internal_edge_count(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.walls as f64 / self.total as f64
        }
    }
}

// ── 1–3. Shape and endpoints ─────────────────────────────────────────────

pub fn check_square(grid: &Grid) -> Result<(), ValidationFailure> {
    if grid.rows == grid.cols {
        Ok(())
    } else {
        Err(ValidationFailure::NotSquare {
            rows: grid.rows,
            cols: grid.cols,
        })
    }
}

pub fn check_size_and_cell_count(
    grid: &Grid,
    rules: &ValidationRules,
) -> Result<(), ValidationFailure> {
    if !rules.size_in_range(grid.rows) || !rules.size_in_range(grid.cols) {
        return Err(ValidationFailure::SizeOutOfRange {
            rows: grid.rows,
            cols: grid.cols,
            min: rules.min_size,
            max: rules.max_size,
        });
    }
    grid.check_shape()?;
    Ok(())
}

/// Start and end present, distinct and in bounds; the start has an open,
/// non-border face.
pub fn check_start_and_end(grid: &Grid) -> Result<(), ValidationFailure> {
    let (Some(start), Some(end)) = (grid.start, grid.end) else {
        return Err(ValidationFailure::InvalidStartOrEnd);
    };
    if start == end || !grid.in_bounds(start) || !grid.in_bounds(end) {
        return Err(ValidationFailure::InvalidStartOrEnd);
    }
    let has_exit = Direction::ALL
        .into_iter()
        .any(|d| grid.is_passable(start, d));
    if has_exit {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidStartOrEnd)
    }
}

// ── 4–5. Wall density ────────────────────────────────────────────────────

pub fn check_wall_count(grid: &Grid, rules: &ValidationRules) -> Result<(), ValidationFailure> {
    grid.check_shape()?;
    let stats = WallStats::of(grid);
    let ratio = stats.ratio();
    let total = stats.total as f64;

    if ratio < rules.min_wall_ratio {
        let min_walls = (total * rules.min_wall_ratio).ceil() as usize;
        Err(ValidationFailure::NotEnoughWalls {
            needed: min_walls.saturating_sub(stats.walls),
        })
    } else if ratio > rules.max_wall_ratio {
        let max_walls = (total * rules.max_wall_ratio).floor() as usize;
        Err(ValidationFailure::TooManyWalls {
            excess: stats.walls.saturating_sub(max_walls),
        })
    } else {
        Ok(())
    }
}

pub fn check_open_cells(grid: &Grid, rules: &ValidationRules) -> Result<(), ValidationFailure> {
    let max = rules.open_cell_cap_for(grid.rows);
    let found = grid.open_cell_count();
    if found > max {
        Err(ValidationFailure::TooManyOpenCells { found, max })
    } else {
        Ok(())
    }
}

// ── 6–7. Paths and reachability ──────────────────────────────────────────

/// Shortest start→end path must exist, be long enough and turn enough.
pub fn check_path_shape(grid: &Grid, rules: &ValidationRules) -> Result<Path, ValidationFailure> {
    let path = pathfinding::find_maze_path(grid)?.ok_or(ValidationFailure::NoPath)?;

    let required = rules.min_path_length(grid.rows);
    if path.len() < required {
        return Err(ValidationFailure::PathTooShort {
            length: path.len(),
            required,
        });
    }

    let required = rules.min_turns(grid.rows);
    if path.turns < required {
        return Err(ValidationFailure::InsufficientTurns {
            turns: path.turns,
            required,
        });
    }
    Ok(path)
}

pub fn check_accessibility(grid: &Grid) -> Result<(), ValidationFailure> {
    let unreachable = pathfinding::unreachable_cells(grid)?;
    if unreachable.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::CellsInaccessible {
            unreachable: unreachable.len(),
        })
    }
}

// ── Master validation ────────────────────────────────────────────────────

/// Full validation with the default rules.
pub fn validate(grid: &Grid) -> ValidationResult {
    validate_with(grid, &ValidationRules::default(), ValidationMode::Full)
}

/// Run the rules in order and stop at the first failure.
pub fn validate_with(grid: &Grid, rules: &ValidationRules, mode: ValidationMode) -> ValidationResult {
    check_square(grid)?;
    check_size_and_cell_count(grid, rules)?;
    check_start_and_end(grid)?;
    check_wall_count(grid, rules)?;
    check_open_cells(grid, rules)?;

    let solution = match mode {
        ValidationMode::Full => Some(check_path_shape(grid, rules)?),
        ValidationMode::Quick => None,
    };

    check_accessibility(grid)?;

    let solution = match solution {
        Some(path) => path,
        None => pathfinding::find_maze_path(grid)?.ok_or(ValidationFailure::NoPath)?,
    };
    Ok(ValidMaze { solution })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;

    /// Rows are east-west corridors; `links` opens the south wall under
    /// each listed cell.
    fn corridor_grid(n: usize, links: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(n, n);
        for row in 0..n {
            for col in 0..n - 1 {
                grid.set_wall(Coord::new(row, col), Direction::East, false)
                    .unwrap();
            }
        }
        for &(row, col) in links {
            grid.set_wall(Coord::new(row, col), Direction::South, false)
                .unwrap();
        }
        grid.set_start(Coord::new(0, 0)).unwrap();
        grid.set_end(Coord::new(n - 1, n - 1)).unwrap();
        grid
    }

    fn fully_walled(n: usize) -> Grid {
        let mut grid = Grid::new(n, n);
        grid.set_start(Coord::new(0, 0)).unwrap();
        grid.set_end(Coord::new(n - 1, n - 1)).unwrap();
        grid
    }

    #[test]
    fn test_not_square() {
        let grid = Grid::new(7, 8);
        let err = validate(&grid).unwrap_err();
        assert_eq!(err, ValidationFailure::NotSquare { rows: 7, cols: 8 });
        assert_eq!(err.category(), "square");
    }

    #[test]
    fn test_size_out_of_range() {
        for n in [3, 6, 12] {
            let err = validate(&fully_walled(n)).unwrap_err();
            assert!(
                matches!(err, ValidationFailure::SizeOutOfRange { .. }),
                "{n}: {err}"
            );
        }
    }

    #[test]
    fn test_cell_count_mismatch() {
        let mut grid = fully_walled(7);
        grid.cells.pop();
        assert_eq!(
            validate(&grid).unwrap_err(),
            ValidationFailure::CellCountMismatch {
                expected: 49,
                found: 48
            }
        );
    }

    #[test]
    fn test_start_end_rules() {
        // Walled-in start.
        let grid = fully_walled(7);
        assert_eq!(check_start_and_end(&grid), Err(ValidationFailure::InvalidStartOrEnd));

        let mut grid = corridor_grid(7, &[]);
        assert_eq!(check_start_and_end(&grid), Ok(()));

        grid.end = grid.start;
        assert!(check_start_and_end(&grid).is_err());

        grid.end = None;
        assert!(check_start_and_end(&grid).is_err());

        grid.end = Some(Coord::new(7, 7));
        assert!(check_start_and_end(&grid).is_err());
    }

    #[test]
    fn test_start_border_face_is_not_an_exit() {
        let mut grid = fully_walled(7);
        grid[Coord::new(0, 0)].wall_north = false;
        grid[Coord::new(0, 0)].wall_west = false;
        assert_eq!(check_start_and_end(&grid), Err(ValidationFailure::InvalidStartOrEnd));
    }

    #[test]
    fn test_fully_walled_has_too_many_walls() {
        let mut grid = fully_walled(7);
        // Give the start an exit so the wall rule is what trips.
        grid.set_wall(Coord::new(0, 0), Direction::East, false).unwrap();
        let err = validate(&grid).unwrap_err();
        assert_eq!(err, ValidationFailure::TooManyWalls { excess: 41 });
        assert_eq!(err.wall_delta(), -41);
    }

    #[test]
    fn test_wall_count_bounds() {
        let rules = ValidationRules::default();
        // 7x7: 84 internal edges, floor 34 walls, ceiling 42 walls.
        let mut grid = corridor_grid(7, &[]);
        assert_eq!(WallStats::of(&grid).walls, 42);
        assert_eq!(check_wall_count(&grid, &rules), Ok(()));

        for col in 0..8 {
            grid.set_wall(Coord::new(col % 6, col / 6 + 1), Direction::South, false)
                .unwrap();
        }
        assert_eq!(WallStats::of(&grid).walls, 34);
        assert_eq!(check_wall_count(&grid, &rules), Ok(()));

        grid.set_wall(Coord::new(0, 4), Direction::South, false).unwrap();
        assert_eq!(
            check_wall_count(&grid, &rules),
            Err(ValidationFailure::NotEnoughWalls { needed: 1 })
        );
    }

    #[test]
    fn test_no_walls_fails() {
        let mut links = Vec::new();
        for row in 0..6 {
            for col in 0..7 {
                links.push((row, col));
            }
        }
        let grid = corridor_grid(7, &links);
        assert_eq!(WallStats::of(&grid).walls, 0);
        assert_eq!(
            validate(&grid).unwrap_err(),
            ValidationFailure::NotEnoughWalls { needed: 34 }
        );
    }

    #[test]
    fn test_six_open_cells_fail_on_seven() {
        // Column 3 runs top to bottom: rows 1..=5 of it become open cells.
        let mut links: Vec<(usize, usize)> = (0..6).map(|r| (r, 3)).collect();
        // One more open cell at (3, 1).
        links.push((2, 1));
        links.push((3, 1));
        let grid = corridor_grid(7, &links);
        assert_eq!(grid.open_cell_count(), 6);
        assert_eq!(WallStats::of(&grid).walls, 34);
        assert_eq!(
            validate(&grid).unwrap_err(),
            ValidationFailure::TooManyOpenCells { found: 6, max: 5 }
        );
    }

    #[test]
    fn test_five_open_cells_pass_open_cell_rule() {
        let links: Vec<(usize, usize)> = (0..6).map(|r| (r, 3)).collect();
        let grid = corridor_grid(7, &links);
        assert_eq!(grid.open_cell_count(), 5);
        let rules = ValidationRules::default();
        assert_eq!(check_open_cells(&grid, &rules), Ok(()));

        // Quick mode passes; the straight spine has only two turns.
        let valid = validate_with(&grid, &rules, ValidationMode::Quick).unwrap();
        assert_eq!(valid.solution.len(), 13);
        assert_eq!(valid.solution.turns, 2);
        assert_eq!(
            validate(&grid).unwrap_err(),
            ValidationFailure::InsufficientTurns {
                turns: 2,
                required: 3
            }
        );
    }

    #[test]
    fn test_wall_count_on_malformed_grid() {
        let mut grid = fully_walled(7);
        grid.cells.pop();
        assert_eq!(
            check_wall_count(&grid, &ValidationRules::default()),
            Err(ValidationFailure::CellCountMismatch {
                expected: 49,
                found: 48
            })
        );
        assert_eq!(WallStats::of(&grid).walls, 84);
    }

    #[test]
    fn test_open_cell_cap_for_larger_mazes() {
        let rules = ValidationRules::default();
        // 9x9: 144 internal edges, floor 58 walls. The spine down column 4
        // opens rows 1..=7 of it; a short run in column 2 adds the rest.
        let mut links: Vec<(usize, usize)> = (0..8).map(|r| (r, 4)).collect();
        links.extend((0..3).map(|r| (r, 2)));
        let grid = corridor_grid(9, &links);
        assert_eq!(grid.open_cell_count(), 9);
        assert_eq!(WallStats::of(&grid).walls, 61);
        assert_eq!(check_open_cells(&grid, &rules), Ok(()));
        assert!(validate_with(&grid, &rules, ValidationMode::Quick).is_ok());

        links.push((3, 2));
        let grid = corridor_grid(9, &links);
        assert_eq!(grid.open_cell_count(), 10);
        assert_eq!(WallStats::of(&grid).walls, 60);
        assert_eq!(
            validate_with(&grid, &rules, ValidationMode::Quick).unwrap_err(),
            ValidationFailure::TooManyOpenCells { found: 10, max: 9 }
        );
    }

    #[test]
    fn test_nearby_end_is_too_short() {
        // Every row joined down column 0; the end sits three cells east
        // of the start on the top row.
        let links: Vec<(usize, usize)> = (0..6).map(|r| (r, 0)).collect();
        let mut grid = corridor_grid(7, &links);
        grid.set_end(Coord::new(0, 3)).unwrap();
        let rules = ValidationRules::default();

        assert_eq!(
            validate(&grid).unwrap_err(),
            ValidationFailure::PathTooShort {
                length: 4,
                required: 12
            }
        );
        let valid = validate_with(&grid, &rules, ValidationMode::Quick).unwrap();
        assert_eq!(valid.solution.len(), 4);
    }

    #[test]
    fn test_unreachable_region() {
        // Rows 0..=5 linked through column 0; row 6 is cut off.
        let links: Vec<(usize, usize)> = (0..5).map(|r| (r, 0)).collect();
        let mut grid = corridor_grid(7, &links);
        grid.set_end(Coord::new(5, 6)).unwrap();
        let rules = ValidationRules::default();
        assert_eq!(
            validate_with(&grid, &rules, ValidationMode::Quick).unwrap_err(),
            ValidationFailure::CellsInaccessible { unreachable: 7 }
        );
    }

    #[test]
    fn test_unreachable_end_is_no_path_in_full_mode() {
        let links: Vec<(usize, usize)> = (0..5).map(|r| (r, 0)).collect();
        let grid = corridor_grid(7, &links);
        assert_eq!(validate(&grid).unwrap_err(), ValidationFailure::NoPath);
    }

    #[test]
    fn test_deterministic() {
        let links: Vec<(usize, usize)> = (0..6).map(|r| (r, 3)).collect();
        let grid = corridor_grid(7, &links);
        let first = validate(&grid);
        for _ in 0..5 {
            assert_eq!(validate(&grid), first);
        }
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            ValidationFailure::NotEnoughWalls { needed: 3 }.to_string(),
            "Not enough walls, add at least 3"
        );
        assert_eq!(
            ValidationFailure::TooManyWalls { excess: 41 }.to_string(),
            "Too many walls, remove at least 41"
        );
        assert!(ValidationFailure::TooManyOpenCells { found: 6, max: 5 }
            .to_string()
            .starts_with("Too many cells with no walls"));
    }
}
