//! Randomized Kruskal maze carving.
//!
//! Every internal edge is listed once (east and south faces), shuffled,
//! then walked over a [`DisjointSet`]: an edge joining two separate
//! regions loses its wall, anything else keeps it. The result is a
//! spanning tree of the cell graph, i.e. a perfect maze.

use rand::seq::SliceRandom;
use rand::Rng;
use stepmaze_logic::grid::{Coord, Direction, Grid, GridError};

use super::disjoint_set::DisjointSet;
use super::endpoints::place_start_at_random_corner;

/// One internal wall, named by the cell on its north or west side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub cell: Coord,
    /// Always `East` or `South`.
    pub direction: Direction,
}

impl Edge {
    /// The cell on the far side of the wall.
    pub fn other(self) -> Coord {
        match self.direction {
            Direction::South => Coord::new(self.cell.row + 1, self.cell.col),
            _ => Coord::new(self.cell.row, self.cell.col + 1),
        }
    }
}

/// All `rows*(cols-1) + cols*(rows-1)` internal edges, row-major.
pub fn internal_edges(rows: usize, cols: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(
        rows * cols.saturating_sub(1) + cols * rows.saturating_sub(1),
    );
    for row in 0..rows {
        for col in 0..cols {
            let cell = Coord::new(row, col);
            if col + 1 < cols {
                edges.push(Edge {
                    cell,
                    direction: Direction::East,
                });
            }
            if row + 1 < rows {
                edges.push(Edge {
                    cell,
                    direction: Direction::South,
                });
            }
        }
    }
    edges
}

/// Remove the wall on both faces of `edge`. The edge must be in bounds.
pub(crate) fn open_edge(grid: &mut Grid, edge: Edge) {
    grid[edge.cell].set_wall(edge.direction, false);
    grid[edge.other()].set_wall(edge.direction.opposite(), false);
}

fn carve(grid: &mut Grid, rng: &mut impl Rng) -> usize {
    let mut edges = internal_edges(grid.rows, grid.cols);
    edges.shuffle(rng);

    let cols = grid.cols;
    let flat = |c: Coord| c.row * cols + c.col;
    let mut sets = DisjointSet::new(grid.cell_count());
    let mut removed = 0;
    for edge in edges {
        if sets.union(flat(edge.cell), flat(edge.other())) {
            open_edge(grid, edge);
            removed += 1;
        }
    }
    removed
}

/// Carve a spanning tree into `grid`, returning the number of walls
/// removed. Walls already open are treated as candidates like any other,
/// so carving a fully walled grid removes exactly `rows*cols - 1`.
pub fn carve_kruskal(grid: &mut Grid, rng: &mut impl Rng) -> Result<usize, GridError> {
    grid.check_shape()?;
    Ok(carve(grid, rng))
}

/// A fully walled grid with the start on a random corner and the goal
/// opposite. Zero-sized grids come back without endpoints.
pub fn generate_empty(rows: usize, cols: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(rows, cols);
    place_endpoints(&mut grid, rng);
    grid
}

/// A perfect maze built with randomized Kruskal.
pub fn generate_random(rows: usize, cols: usize, rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::new(rows, cols);
    let removed = carve(&mut grid, rng);
    place_endpoints(&mut grid, rng);
    log::debug!(
        "Carved {}x{} maze: {} walls removed, start {:?}, goal {:?}",
        rows,
        cols,
        removed,
        grid.start,
        grid.end
    );
    grid
}

fn place_endpoints(grid: &mut Grid, rng: &mut impl Rng) {
    if grid.rows == 0 || grid.cols == 0 {
        log::warn!(
            "Cannot place endpoints on a {}x{} grid",
            grid.rows,
            grid.cols
        );
        return;
    }
    if let Err(e) = place_start_at_random_corner(grid, rng) {
        log::warn!("Endpoint placement failed: {}", e);
    }
}
