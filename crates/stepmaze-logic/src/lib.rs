//! Pure maze logic for StepMaze.
//!
//! This crate contains the maze model and every check that runs on it,
//! independent of any engine, renderer or input device. Functions take a
//! grid by reference and return results, so they are unit-testable and
//! usable from the editor, the level loader and headless tools alike.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Validation thresholds as a serializable rule set |
//! | [`constants`] | Size bounds, thresholds, mode and element names |
//! | [`elements`] | Challenge-mode element records, ranges and selection |
//! | [`grid`] | Cells, coordinates, directions, corners and wall symmetry |
//! | [`level`] | Level file layout and conversion to/from a grid |
//! | [`pathfinding`] | BFS shortest path, turn counting, reachability |
//! | [`validation`] | Ordered structural rules with first-failure reporting |

pub mod config;
pub mod constants;
pub mod elements;
pub mod grid;
pub mod level;
pub mod pathfinding;
pub mod validation;

pub use grid::{Cell, Coord, Corner, Direction, Grid, GridError};
pub use level::{GameMode, Level, LevelError, LevelFile};
pub use pathfinding::Path;
pub use validation::{ValidMaze, ValidationFailure, ValidationMode, ValidationResult};
