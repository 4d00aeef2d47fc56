//! BFS pathfinding over the open-wall graph of a maze grid.
//!
//! Two cells are connected when they are orthogonal neighbours and the wall
//! between them is open. All searches use flat `Vec`s indexed by
//! [`Grid::index_of`] and scan neighbours in `Direction::ALL` order, so the
//! same grid always yields the same path.

use crate::grid::{Coord, Grid, GridError};
use std::collections::VecDeque;

/// A shortest path from start to end, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub cells: Vec<Coord>,
    /// Direction changes along the path.
    pub turns: usize,
}

impl Path {
    fn from_cells(cells: Vec<Coord>) -> Self {
        let turns = count_turns(&cells);
        Self { cells, turns }
    }

    /// Number of cells on the path (not steps).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Count positions `1..len-1` where the incoming step differs from the
/// outgoing step.
pub fn count_turns(cells: &[Coord]) -> usize {
    cells
        .windows(3)
        .filter(|w| step(w[0], w[1]) != step(w[1], w[2]))
        .count()
}

fn step(from: Coord, to: Coord) -> (isize, isize) {
    (
        to.row as isize - from.row as isize,
        to.col as isize - from.col as isize,
    )
}

fn check_endpoint(grid: &Grid, coord: Coord) -> Result<usize, GridError> {
    grid.index_of(coord).ok_or(GridError::OutOfBounds(coord))
}

/// Find the shortest path from `start` to `end`.
///
/// Returns `Ok(None)` when `end` is unreachable. Malformed grids and
/// out-of-bounds endpoints are reported as errors.
pub fn find_path(grid: &Grid, start: Coord, end: Coord) -> Result<Option<Path>, GridError> {
    grid.check_shape()?;
    let start_idx = check_endpoint(grid, start)?;
    let end_idx = check_endpoint(grid, end)?;

    let mut parent: Vec<Option<usize>> = vec![None; grid.cell_count()];
    let mut visited = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();
    visited[start_idx] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            break;
        }
        let current_idx = current.row * grid.cols + current.col;
        for next in grid.open_neighbors(current) {
            let next_idx = next.row * grid.cols + next.col;
            if !visited[next_idx] {
                visited[next_idx] = true;
                parent[next_idx] = Some(current_idx);
                queue.push_back(next);
            }
        }
    }

    if !visited[end_idx] {
        return Ok(None);
    }

    let mut cells = vec![end];
    let mut cursor = end_idx;
    while let Some(prev) = parent[cursor] {
        cells.push(grid.coord_of(prev));
        cursor = prev;
    }
    cells.reverse();
    Ok(Some(Path::from_cells(cells)))
}

/// Shortest path between the grid's own start and end points.
pub fn find_maze_path(grid: &Grid) -> Result<Option<Path>, GridError> {
    let start = grid.start.ok_or(GridError::MissingStart)?;
    let end = grid.end.ok_or(GridError::MissingEnd)?;
    find_path(grid, start, end)
}

/// Visited mask of a full BFS flood from `from`, indexed like `grid.cells`.
pub fn reachable_from(grid: &Grid, from: Coord) -> Result<Vec<bool>, GridError> {
    grid.check_shape()?;
    let from_idx = check_endpoint(grid, from)?;

    let mut visited = vec![false; grid.cell_count()];
    let mut queue = VecDeque::new();
    visited[from_idx] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for next in grid.open_neighbors(current) {
            let next_idx = next.row * grid.cols + next.col;
            if !visited[next_idx] {
                visited[next_idx] = true;
                queue.push_back(next);
            }
        }
    }
    Ok(visited)
}

/// True when every cell is reachable from the grid's start point.
pub fn check_accessible_cells(grid: &Grid) -> Result<bool, GridError> {
    let start = grid.start.ok_or(GridError::MissingStart)?;
    let visited = reachable_from(grid, start)?;
    Ok(visited.iter().all(|&v| v))
}

/// Cells not reachable from the start point, in row-major order.
pub fn unreachable_cells(grid: &Grid) -> Result<Vec<Coord>, GridError> {
    let start = grid.start.ok_or(GridError::MissingStart)?;
    let visited = reachable_from(grid, start)?;
    Ok(visited
        .iter()
        .enumerate()
        .filter(|(_, &v)| !v)
        .map(|(i, _)| grid.coord_of(i))
        .collect())
}
