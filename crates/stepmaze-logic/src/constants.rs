//! Game constants: size bounds, validation thresholds, mode and element
//! names.
//!
//! These are the defaults behind [`crate::config::ValidationRules`] and the
//! string tags used by the level file format.

pub mod size {
    pub const MIN: usize = 7;
    pub const MAX: usize = 11;
    pub const DEFAULT: usize = 7;
}

pub mod thresholds {
    pub const MIN_WALL_RATIO: f64 = 0.4;
    pub const MAX_WALL_RATIO: f64 = 0.5;
    /// Mazes of this size get the tighter open-cell cap.
    pub const SMALL_MAZE_SIZE: usize = 7;
    pub const SMALL_MAZE_OPEN_CELL_CAP: usize = 5;
    pub const OPEN_CELL_CAP: usize = 9;
    /// Minimum path cells = `PATH_LENGTH_SCALE * rows - PATH_LENGTH_OFFSET`.
    pub const PATH_LENGTH_SCALE: usize = 2;
    pub const PATH_LENGTH_OFFSET: usize = 2;
    /// Minimum turns = `rows / TURN_DIVISOR`.
    pub const TURN_DIVISOR: usize = 2;
}

pub mod modes {
    pub const RELAX: &str = "Relax";
    pub const CHALLENGE: &str = "Challenge";
}

pub mod element_types {
    pub const DOG: &str = "Dog";
    pub const BONES: &str = "Bones";
    pub const SHIELD: &str = "Shield";
    pub const SPECIAL: &str = "Special";
}
