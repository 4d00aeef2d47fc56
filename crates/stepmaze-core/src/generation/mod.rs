//! Generation - procedural creation of mazes.
//!
//! [`generate`] is the one-call entry point: a Kruskal maze of the
//! configured size, start and goal on opposite corners, plus any extra
//! holes. The pieces are public for callers that need finer control.

mod disjoint_set;
mod endpoints;
mod holes;
mod kruskal;

pub use disjoint_set::*;
pub use endpoints::*;
pub use holes::*;
pub use kruskal::*;

use rand::Rng;
use serde::{Deserialize, Serialize};
use stepmaze_logic::constants::size;
use stepmaze_logic::grid::Grid;

/// Configuration for maze generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Side length of the square maze
    pub size: usize,
    /// Extra walls knocked out after carving
    pub holes: usize,
    /// Fixed RNG seed; `None` draws from entropy
    pub seed: Option<u64>,
    /// Attempts the editor makes before giving up on a valid maze
    pub max_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            size: size::DEFAULT,
            holes: 0,
            seed: None,
            max_attempts: 32,
        }
    }
}

/// Generate a square maze per `config`. The seed field is ignored here;
/// seeding is the caller's business.
pub fn generate(config: &GenerationConfig, rng: &mut impl Rng) -> Grid {
    let mut grid = generate_random(config.size, config.size, rng);
    let punched = if config.size > 0 {
        punch_holes(&mut grid, config.holes, rng)
    } else {
        0
    };
    log::info!(
        "Generated {}x{} maze ({} walls, {} holes), start {:?}, goal {:?}",
        config.size,
        config.size,
        grid.internal_wall_count(),
        punched,
        grid.start,
        grid.end
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.size, 7);
        assert_eq!(config.holes, 0);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_attempts, 32);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: GenerationConfig = serde_json::from_str(r#"{"size": 9, "holes": 2}"#).unwrap();
        assert_eq!(config.size, 9);
        assert_eq!(config.holes, 2);
        assert_eq!(config.max_attempts, 32);
    }

    #[test]
    fn test_generate_with_holes() {
        let mut rng = StdRng::seed_from_u64(21);
        let config = GenerationConfig {
            size: 8,
            holes: 3,
            ..Default::default()
        };
        let grid = generate(&config, &mut rng);
        // 112 edges, 63 carved, 3 punched.
        assert_eq!(grid.internal_wall_count(), 112 - 63 - 3);
        assert!(grid.start.is_some() && grid.end.is_some());
    }
}
