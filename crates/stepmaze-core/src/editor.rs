//! Editor session - main entry point for building and checking levels

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{Read, Write};

use stepmaze_logic::config::{validate_rules, ConfigError, ValidationRules};
use stepmaze_logic::elements::ElementSelection;
use stepmaze_logic::grid::{Coord, Direction, Grid, GridError};
use stepmaze_logic::level::{GameMode, Level};
use stepmaze_logic::pathfinding::Path;
use stepmaze_logic::validation::{validate_with, ValidationFailure, ValidationMode, ValidationResult};

use crate::generation::{generate, generate_empty, generate_random, move_start, GenerationConfig};
use crate::persistence::{load_level_json, save_level_json, SaveError};

/// One level being edited, plus the RNG and rules used on it.
pub struct MazeEditor {
    /// The level under edit
    pub level: Level,
    rules: ValidationRules,
    rng: StdRng,
}

impl MazeEditor {
    /// Empty default-size level, entropy-seeded RNG
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as [`MazeEditor::new`] but reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let size = GenerationConfig::default().size;
        let grid = generate_empty(size, size, &mut rng);
        Self {
            level: Level::new(grid),
            rules: ValidationRules::default(),
            rng,
        }
    }

    /// Edit an existing level
    pub fn from_level(level: Level, seed: u64) -> Self {
        Self {
            level,
            rules: ValidationRules::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.level.grid
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Replace the validation rules. Nonsense rule sets are refused and
    /// the current rules kept.
    pub fn set_rules(&mut self, rules: ValidationRules) -> Result<(), ConfigError> {
        if let Some(error) = validate_rules(&rules).into_iter().next() {
            return Err(error);
        }
        self.rules = rules;
        Ok(())
    }

    // ── Fresh grids ─────────────────────────────────────────────────────

    /// Replace the maze with a fully walled `size × size` grid.
    pub fn new_empty(&mut self, size: usize) {
        let grid = generate_empty(size, size, &mut self.rng);
        self.replace_grid(grid);
    }

    /// Replace the maze with a random perfect maze.
    pub fn new_random(&mut self, size: usize) {
        let grid = generate_random(size, size, &mut self.rng);
        self.replace_grid(grid);
    }

    /// Generate until a maze passes full validation or `max_attempts` runs
    /// out. The last generated maze is kept either way; on failure the
    /// last validation failure is returned.
    pub fn generate_valid(&mut self, config: &GenerationConfig) -> ValidationResult {
        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let attempts = config.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let grid = generate(config, &mut self.rng);
            let verdict = validate_with(&grid, &self.rules, ValidationMode::Full);
            self.replace_grid(grid);
            match verdict {
                Ok(valid) => {
                    log::info!(
                        "Valid {}x{} maze after {} attempt(s), solution {} cells",
                        config.size,
                        config.size,
                        attempt,
                        valid.solution.len()
                    );
                    return Ok(valid);
                }
                Err(failure) if attempt >= attempts => {
                    log::warn!("Giving up after {} attempts: {}", attempt, failure);
                    return Err(failure);
                }
                Err(failure) => {
                    log::warn!("Attempt {} rejected: {}", attempt, failure);
                }
            }
        }
    }

    /// Swap in a new grid, re-clamping challenge elements to its size.
    fn replace_grid(&mut self, grid: Grid) {
        let old_size = self.level.grid.rows;
        let new_size = grid.rows;
        self.level.grid = grid;
        if self.level.mode == GameMode::Challenge && old_size != new_size {
            let selection = ElementSelection::from_elements(&self.level.elements, old_size);
            self.level.elements = selection.build(new_size);
        }
    }

    // ── Edits ───────────────────────────────────────────────────────────

    /// Flip the wall on `direction` of `coord` (both faces). Returns
    /// whether the wall now stands.
    pub fn toggle_wall(&mut self, coord: Coord, direction: Direction) -> Result<bool, GridError> {
        let grid = &mut self.level.grid;
        let present = !grid
            .cell(coord)
            .ok_or(GridError::OutOfBounds(coord))?
            .wall(direction);
        if let Err(e) = grid.set_wall(coord, direction, present) {
            log::warn!("Rejected wall toggle: {}", e);
            return Err(e);
        }
        Ok(present)
    }

    /// Move the start to a corner; the goal follows to the opposite one.
    /// Returns the new goal.
    pub fn set_start(&mut self, coord: Coord) -> Result<Coord, GridError> {
        move_start(&mut self.level.grid, coord)
    }

    /// Switching to relax drops all elements.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.level.mode = mode;
        if mode == GameMode::Relax {
            self.level.elements.clear();
        }
    }

    /// Replace the challenge elements. Ignored in relax mode; returns the
    /// number of elements stored.
    pub fn set_elements(&mut self, selection: &ElementSelection) -> usize {
        if self.level.mode == GameMode::Relax {
            self.level.elements.clear();
            return 0;
        }
        self.level.elements = selection.build(self.level.grid.rows);
        self.level.elements.len()
    }

    pub fn element_selection(&self) -> ElementSelection {
        ElementSelection::from_elements(&self.level.elements, self.level.grid.rows)
    }

    // ── Checks ──────────────────────────────────────────────────────────

    /// Rules 1–5 and reachability; what custom levels must pass to load.
    pub fn validate_quick(&self) -> ValidationResult {
        validate_with(&self.level.grid, &self.rules, ValidationMode::Quick)
    }

    pub fn validate_full(&self) -> ValidationResult {
        validate_with(&self.level.grid, &self.rules, ValidationMode::Full)
    }

    /// Shortest start→goal route, if the maze passes quick validation.
    pub fn solution_hint(&self) -> Option<Path> {
        self.validate_quick().ok().map(|valid| valid.solution)
    }

    // ── Save/Load ───────────────────────────────────────────────────────

    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        save_level_json(writer, &self.level)
    }

    /// Replace the current level with one read from `reader`. Returns the
    /// quick validation verdict for the loaded maze.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<Result<(), ValidationFailure>, SaveError> {
        let level = load_level_json(reader)?;
        let verdict = validate_with(&level.grid, &self.rules, ValidationMode::Quick).map(|_| ());
        if let Err(failure) = &verdict {
            log::warn!("Loaded level fails validation: {}", failure);
        }
        self.level = level;
        Ok(verdict)
    }
}

impl Default for MazeEditor {
    fn default() -> Self {
        Self::new()
    }
}
