//! Integration tests for the pathfinder and validator on hand-built grids.
//!
//! Exercises: Grid → set_wall → find_path / check_accessible_cells →
//! validate, plus the level file round trip.
//!
//! All tests are pure logic: no generation, no I/O.

use stepmaze_logic::config::ValidationRules;
use stepmaze_logic::grid::{Coord, Direction, Grid};
use stepmaze_logic::level::{GameMode, Level, LevelFile};
use stepmaze_logic::pathfinding::{check_accessible_cells, find_path};
use stepmaze_logic::validation::{validate, validate_with, ValidationFailure, ValidationMode};

// ── Helpers ────────────────────────────────────────────────────────────

/// Every internal wall removed.
fn open_grid(n: usize) -> Grid {
    let mut grid = Grid::new(n, n);
    for row in 0..n {
        for col in 0..n {
            let c = Coord::new(row, col);
            if col + 1 < n {
                grid.set_wall(c, Direction::East, false).unwrap();
            }
            if row + 1 < n {
                grid.set_wall(c, Direction::South, false).unwrap();
            }
        }
    }
    grid
}

/// Tiny xorshift so the logic crate needs no RNG dependency.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

/// Distances by repeated relaxation over every open edge until nothing
/// changes. Deliberately not a BFS.
fn brute_force_distances(grid: &Grid, from: Coord) -> Vec<Option<usize>> {
    let mut dist: Vec<Option<usize>> = vec![None; grid.cells.len()];
    dist[grid.index_of(from).unwrap()] = Some(0);
    loop {
        let mut changed = false;
        for coord in grid.coords() {
            let Some(d) = dist[grid.index_of(coord).unwrap()] else {
                continue;
            };
            for dir in Direction::ALL {
                if grid.is_passable(coord, dir) {
                    let next = grid.neighbor(coord, dir).unwrap();
                    let slot = &mut dist[grid.index_of(next).unwrap()];
                    if slot.map_or(true, |old| d + 1 < old) {
                        *slot = Some(d + 1);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

fn random_walls(n: usize, seed: u64, toggles: usize) -> Grid {
    let mut rng = XorShift(seed);
    let mut grid = open_grid(n);
    for _ in 0..toggles {
        let c = Coord::new(rng.below(n), rng.below(n));
        let dir = Direction::ALL[rng.below(4)];
        let present = rng.below(2) == 0;
        // Border faces are rejected; that's fine here.
        let _ = grid.set_wall(c, dir, present);
    }
    grid
}

// ── BFS optimality ─────────────────────────────────────────────────────

#[test]
fn known_detour_has_nine_cells() {
    let mut grid = open_grid(7);
    // Wall between columns 1 and 2 for rows 0..=2.
    for row in 0..3 {
        grid.set_wall(Coord::new(row, 1), Direction::East, true).unwrap();
    }
    let path = find_path(&grid, Coord::new(0, 0), Coord::new(0, 2))
        .unwrap()
        .unwrap();
    assert_eq!(path.len(), 9);
    assert_eq!(path.cells[0], Coord::new(0, 0));
    assert_eq!(*path.cells.last().unwrap(), Coord::new(0, 2));
    assert!(path.cells.contains(&Coord::new(3, 1)));
    assert!(path.cells.contains(&Coord::new(3, 2)));
}

#[test]
fn bfs_matches_brute_force_distances() {
    for seed in 1..40u64 {
        let n = 5 + (seed as usize % 3);
        let grid = random_walls(n, seed * 7919, n * n * 2);
        let from = Coord::new(0, 0);
        let dist = brute_force_distances(&grid, from);
        for to in grid.coords() {
            let path = find_path(&grid, from, to).unwrap();
            let expected = dist[grid.index_of(to).unwrap()];
            match (path, expected) {
                (Some(p), Some(d)) => assert_eq!(p.steps(), d, "seed {seed} to {to}"),
                (None, None) => {}
                (p, d) => panic!("seed {seed} to {to}: bfs {:?} vs brute {:?}", p, d),
            }
        }
    }
}

#[test]
fn paths_only_cross_open_walls() {
    let grid = random_walls(7, 42, 120);
    let far = Coord::new(6, 6);
    if let Some(path) = find_path(&grid, Coord::new(0, 0), far).unwrap() {
        for pair in path.cells.windows(2) {
            let dir = Direction::ALL
                .into_iter()
                .find(|&d| grid.neighbor(pair[0], d) == Some(pair[1]))
                .expect("consecutive path cells must be neighbours");
            assert!(grid.is_passable(pair[0], dir));
        }
    }
}

// ── Wall symmetry ──────────────────────────────────────────────────────

#[test]
fn toggles_keep_walls_symmetric() {
    for seed in 1..20u64 {
        let grid = random_walls(9, seed, 300);
        assert!(grid.has_symmetric_walls(), "seed {seed}");
    }
}

// ── Reachability ───────────────────────────────────────────────────────

#[test]
fn accessibility_agrees_with_brute_force() {
    for seed in 1..30u64 {
        let mut grid = random_walls(7, seed * 31, 140);
        grid.set_start(Coord::new(0, 0)).unwrap();
        let all_reached = brute_force_distances(&grid, Coord::new(0, 0))
            .iter()
            .all(|d| d.is_some());
        assert_eq!(check_accessible_cells(&grid), Ok(all_reached), "seed {seed}");
    }
}

// ── Validation through the file format ─────────────────────────────────

/// 7x7 serpentine: one corridor through every cell, 36 of 84 internal
/// walls left standing.
fn serpentine_level() -> Level {
    let n = 7;
    let mut grid = Grid::new(n, n);
    for row in 0..n {
        for col in 0..n - 1 {
            grid.set_wall(Coord::new(row, col), Direction::East, false)
                .unwrap();
        }
        if row + 1 < n {
            let col = if row % 2 == 0 { n - 1 } else { 0 };
            grid.set_wall(Coord::new(row, col), Direction::South, false)
                .unwrap();
        }
    }
    grid.set_start(Coord::new(0, 0)).unwrap();
    grid.set_end(Coord::new(6, 6)).unwrap();
    Level::new(grid)
}

#[test]
fn serpentine_passes_full_validation() {
    let level = serpentine_level();
    let grid = &level.grid;
    assert_eq!(grid.internal_wall_count(), 36);
    let valid = validate(grid).unwrap();
    assert_eq!(valid.solution.len(), 49);
    assert_eq!(valid.solution.turns, 12);
}

#[test]
fn json_roundtrip_preserves_verdict() {
    let level = serpentine_level();
    let json = serde_json::to_string_pretty(&level.to_file()).unwrap();
    let file: LevelFile = serde_json::from_str(&json).unwrap();
    let loaded = Level::from_file(file).unwrap();
    assert_eq!(loaded.mode, GameMode::Relax);
    assert_eq!(validate(&loaded.grid), validate(&level.grid));
}

#[test]
fn original_layout_json_loads() {
    // Two-by-two excerpt in the shipped file layout, extra fields ignored.
    let json = r#"{
        "mode": "Challenge",
        "rows": 2,
        "columns": 2,
        "cellsSerialized": [
            {"x":0,"y":0,"IsVisited":false,"WallRight":false,"WallFront":true,"WallLeft":true,"WallBack":true,"IsGoal":false,"IsStart":true},
            {"x":0,"y":1,"IsVisited":false,"WallRight":true,"WallFront":false,"WallLeft":false,"WallBack":true,"IsGoal":false,"IsStart":false},
            {"x":1,"y":0,"IsVisited":false,"WallRight":false,"WallFront":true,"WallLeft":true,"WallBack":true,"IsGoal":false,"IsStart":false},
            {"x":1,"y":1,"IsVisited":false,"WallRight":true,"WallFront":true,"WallLeft":false,"WallBack":false,"IsGoal":true,"IsStart":false}
        ],
        "start": {"x":0,"y":0},
        "end": {"x":1,"y":1},
        "elements": [{"type":"Special","detectionSize":0.0}],
        "cells": null
    }"#;
    let file: LevelFile = serde_json::from_str(json).unwrap();
    let level = Level::from_file(file).unwrap();
    assert_eq!(level.mode, GameMode::Challenge);
    assert!(level.grid.has_symmetric_walls());
    let path = find_path(&level.grid, Coord::new(0, 0), Coord::new(1, 1))
        .unwrap()
        .unwrap();
    assert_eq!(path.len(), 3);
    // Too small for the rules, caught by the validator not the loader.
    assert!(matches!(
        validate_with(&level.grid, &ValidationRules::default(), ValidationMode::Quick),
        Err(ValidationFailure::SizeOutOfRange { .. })
    ));
}
