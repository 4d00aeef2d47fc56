//! Start and goal placement.
//!
//! The start always sits on a corner and the goal on the diagonally
//! opposite one. Moving the start re-derives the goal.

use rand::Rng;
use stepmaze_logic::grid::{Coord, Corner, Grid, GridError};

/// Put the start on a uniformly random corner and the goal opposite it.
/// Returns the start.
pub fn place_start_at_random_corner(
    grid: &mut Grid,
    rng: &mut impl Rng,
) -> Result<Coord, GridError> {
    let corner = Corner::ALL[rng.gen_range(0..Corner::ALL.len())];
    let start = corner.coord(grid.rows, grid.cols);
    grid.set_start(start)?;
    set_end_point_opposite_start(grid)?;
    Ok(start)
}

/// Clear every goal flag, then flag the corner opposite the start as the
/// goal. Safe to call repeatedly. Returns the new goal.
pub fn set_end_point_opposite_start(grid: &mut Grid) -> Result<Coord, GridError> {
    grid.clear_goal_flags();
    grid.end = None;
    let start = grid.start.ok_or(GridError::MissingStart)?;
    if !grid.in_bounds(start) {
        return Err(GridError::OutOfBounds(start));
    }
    let corner = Corner::of(start, grid.rows, grid.cols).ok_or(GridError::StartNotCorner(start))?;
    let end = corner.opposite().coord(grid.rows, grid.cols);
    grid.set_end(end)?;
    Ok(end)
}

/// Move the start to `coord`, which must be a corner, and re-derive the
/// goal. On error the grid is left unchanged.
pub fn move_start(grid: &mut Grid, coord: Coord) -> Result<Coord, GridError> {
    if !grid.in_bounds(coord) {
        return Err(GridError::OutOfBounds(coord));
    }
    if Corner::of(coord, grid.rows, grid.cols).is_none() {
        log::warn!("Rejected start at {}: not a corner", coord);
        return Err(GridError::StartNotCorner(coord));
    }
    grid.set_start(coord)?;
    set_end_point_opposite_start(grid)
}
