//! StepMaze Core - maze engine for the StepMaze level editor
//!
//! Builds on the pure rules in `stepmaze_logic` with everything that needs
//! randomness, mutable session state or I/O.
//!
//! # Architecture
//!
//! - **Generation**: randomized Kruskal over a union-find, corner
//!   start/goal placement, optional extra holes
//! - **Editor**: one level under edit with its own seeded RNG
//! - **Persistence**: JSON level files and bincode library snapshots
//!
//! # Example
//!
//! ```rust,no_run
//! use stepmaze_core::prelude::*;
//!
//! let mut editor = MazeEditor::new();
//!
//! // Keep generating until a maze passes every rule
//! match editor.generate_valid(&GenerationConfig::default()) {
//!     Ok(valid) => println!("solution is {} cells", valid.solution.len()),
//!     Err(failure) => println!("no valid maze: {}", failure),
//! }
//! ```

pub mod editor;
pub mod generation;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::editor::MazeEditor;
    pub use crate::generation::{generate, generate_empty, generate_random, GenerationConfig};
    pub use crate::persistence::{LevelLibrary, SaveError};
    pub use stepmaze_logic::grid::{Coord, Corner, Direction, Grid, GridError};
    pub use stepmaze_logic::level::{GameMode, Level};
    pub use stepmaze_logic::validation::{validate, ValidationFailure, ValidationMode};
}
