//! Extra openings for non-perfect mazes.
//!
//! A Kruskal maze has exactly one route between any two cells. Knocking
//! out a few more walls afterwards adds loops.

use rand::seq::SliceRandom;
use rand::Rng;
use stepmaze_logic::grid::Grid;

use super::kruskal::{internal_edges, open_edge, Edge};

/// Internal edges whose wall is still standing.
pub fn standing_walls(grid: &Grid) -> Vec<Edge> {
    if grid.check_shape().is_err() {
        return Vec::new();
    }
    internal_edges(grid.rows, grid.cols)
        .into_iter()
        .filter(|e| grid[e.cell].wall(e.direction))
        .collect()
}

/// Remove up to `count` random standing internal walls (both faces).
/// Returns how many were removed.
pub fn punch_holes(grid: &mut Grid, count: usize, rng: &mut impl Rng) -> usize {
    if count == 0 {
        return 0;
    }
    let mut walls = standing_walls(grid);
    let (chosen, _) = walls.partial_shuffle(rng, count);
    let punched = chosen.len();
    for &edge in chosen.iter() {
        open_edge(grid, edge);
    }
    log::debug!("Punched {} of {} requested holes", punched, count);
    punched
}
