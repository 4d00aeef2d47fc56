//! StepMaze Headless Maze Harness
//!
//! Sweeps maze generation and validation across many seeds, plus a set of
//! fixed scenarios. Runs entirely in-process: no rendering, no input.
//!
//! Usage:
//!   cargo run -p stepmaze-simtest
//!   cargo run -p stepmaze-simtest -- --verbose
//!   cargo run -p stepmaze-simtest -- --trials 500 --seed 7
//!
//! Log output goes through `env_logger`; set `RUST_LOG=debug` to see every
//! generated maze.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use stepmaze_core::editor::MazeEditor;
use stepmaze_core::generation::{
    generate, generate_empty, generate_random, punch_holes, set_end_point_opposite_start,
    GenerationConfig,
};
use stepmaze_core::persistence::{level_from_json, level_to_json};
use stepmaze_logic::config::{validate_rules, ValidationRules};
use stepmaze_logic::constants::size;
use stepmaze_logic::elements::{DogSelection, ElementCounts, ElementRanges, ElementSelection};
use stepmaze_logic::grid::{Coord, Corner, Direction, Grid};
use stepmaze_logic::level::{GameMode, Level};
use stepmaze_logic::pathfinding::check_accessible_cells;
use stepmaze_logic::validation::{validate, ValidationFailure};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    trials: usize,
    seed: u64,
}

impl Options {
    /// Parse `--verbose`, `--trials N` and `--seed N`. A numeric flag with a
    /// missing or unparsable value is an error, not a silent default.
    fn parse(args: &[String]) -> Result<Self, String> {
        let value_of = |flag: &str| -> Result<Option<u64>, String> {
            let Some(i) = args.iter().position(|a| a == flag) else {
                return Ok(None);
            };
            let raw = args
                .get(i + 1)
                .ok_or_else(|| format!("{} needs a value", flag))?;
            raw.parse::<u64>()
                .map(Some)
                .map_err(|_| format!("{} expects a number, got '{}'", flag, raw))
        };
        Ok(Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            trials: value_of("--trials")?.map_or(200, |t| t.max(1) as usize),
            seed: value_of("--seed")?.unwrap_or(42),
        })
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let opts = match Options::parse(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    println!("=== StepMaze Maze Harness ===\n");

    let mut results = Vec::new();

    // 1. Kruskal generation sweep
    results.extend(validate_generation(&opts));

    // 2. Validator pass rate on random mazes
    results.extend(validate_pass_rate(&opts));

    // 3. Boundary scenarios
    results.extend(validate_boundaries(&opts));

    // 4. Start/goal corner mapping
    results.extend(validate_corner_mapping(&opts));

    // 5. Level file round trip
    results.extend(validate_level_roundtrip(&opts));

    // 6. Challenge element ranges
    results.extend(validate_element_ranges(&opts));

    // 7. Editor session
    results.extend(validate_editor(&opts));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn sizes() -> std::ops::RangeInclusive<usize> {
    size::MIN..=size::MAX
}

// ── 1. Generation ───────────────────────────────────────────────────────

fn validate_generation(opts: &Options) -> Vec<TestResult> {
    println!("--- Kruskal Generation ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed);

    for n in sizes() {
        let mut not_tree = 0;
        let mut asymmetric = 0;
        let mut disconnected = 0;
        for _ in 0..opts.trials {
            let grid = generate_random(n, n, &mut rng);
            if grid.internal_edge_count() - grid.internal_wall_count() != n * n - 1 {
                not_tree += 1;
            }
            if !grid.has_symmetric_walls() {
                asymmetric += 1;
            }
            if check_accessible_cells(&grid) != Ok(true) {
                disconnected += 1;
            }
        }
        let bad = not_tree + asymmetric + disconnected;
        results.push(TestResult {
            name: format!("generation_{}x{}", n, n),
            passed: bad == 0,
            detail: format!(
                "{} mazes: {} not spanning trees, {} asymmetric, {} disconnected",
                opts.trials, not_tree, asymmetric, disconnected
            ),
        });
    }

    let mut with_holes = 0;
    for n in sizes() {
        let mut grid = generate_random(n, n, &mut rng);
        let before = grid.internal_wall_count();
        let punched = punch_holes(&mut grid, 3, &mut rng);
        if punched == 3 && grid.internal_wall_count() == before - 3 && grid.has_symmetric_walls() {
            with_holes += 1;
        }
    }
    results.push(TestResult {
        name: "generation_holes".into(),
        passed: with_holes == sizes().count(),
        detail: format!("{}/{} sizes punched 3 symmetric holes", with_holes, sizes().count()),
    });

    if opts.verbose {
        let sample = generate_random(size::MIN, size::MIN, &mut rng);
        println!("{}", render(&sample));
    }

    results
}

// ── 2. Pass rate ────────────────────────────────────────────────────────

fn validate_pass_rate(opts: &Options) -> Vec<TestResult> {
    println!("--- Validator Pass Rate ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(1));

    for n in sizes() {
        let mut failures: BTreeMap<&'static str, usize> = BTreeMap::new();
        for _ in 0..opts.trials {
            if let Err(failure) = validate(&generate_random(n, n, &mut rng)) {
                *failures.entry(failure.category()).or_default() += 1;
            }
        }
        let failed: usize = failures.values().sum();
        let passed = opts.trials - failed;
        results.push(TestResult {
            name: format!("pass_rate_{}x{}", n, n),
            passed: passed * 10 >= opts.trials * 9,
            detail: format!("{}/{} valid, failures {:?}", passed, opts.trials, failures),
        });
    }

    // Failures allowed on a perfect maze: only the turn and open-cell rules.
    let mut unexpected = 0;
    for n in sizes() {
        for _ in 0..opts.trials {
            match validate(&generate_random(n, n, &mut rng)) {
                Ok(_)
                | Err(ValidationFailure::InsufficientTurns { .. })
                | Err(ValidationFailure::TooManyOpenCells { .. }) => {}
                Err(other) => {
                    log::warn!("Unexpected failure on {}x{}: {}", n, n, other);
                    unexpected += 1;
                }
            }
        }
    }
    results.push(TestResult {
        name: "pass_rate_failure_kinds".into(),
        passed: unexpected == 0,
        detail: format!("{} failures outside turn/open-cell rules", unexpected),
    });

    results
}

// ── 3. Boundaries ───────────────────────────────────────────────────────

fn validate_boundaries(opts: &Options) -> Vec<TestResult> {
    println!("--- Boundary Scenarios ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(2));
    let rules = ValidationRules::default();

    // Fully walled: start has no exit, and the walls are 100%.
    let empty = generate_empty(7, 7, &mut rng);
    let verdict = validate(&empty);
    let walls = stepmaze_logic::validation::check_wall_count(&empty, &rules);
    results.push(TestResult {
        name: "boundary_fully_walled".into(),
        passed: verdict == Err(ValidationFailure::InvalidStartOrEnd)
            && walls == Err(ValidationFailure::TooManyWalls { excess: 42 }),
        detail: format!("validate: {:?}, wall rule: {:?}", verdict, walls),
    });

    // No walls at all.
    let mut open = generate_empty(7, 7, &mut rng);
    punch_holes(&mut open, usize::MAX, &mut rng);
    let verdict = validate(&open);
    results.push(TestResult {
        name: "boundary_no_walls".into(),
        passed: verdict == Err(ValidationFailure::NotEnoughWalls { needed: 34 }),
        detail: format!("{:?}", verdict),
    });

    // Six open cells in a 7x7 (cap is five).
    let six = six_open_cells_grid();
    let verdict = validate(&six);
    results.push(TestResult {
        name: "boundary_six_open_cells".into(),
        passed: verdict
            == Err(ValidationFailure::TooManyOpenCells { found: 6, max: 5 }),
        detail: format!("{:?}", verdict),
    });

    // Outside the size range on both sides.
    let small = generate_random(6, 6, &mut rng);
    let large = generate_random(12, 12, &mut rng);
    let small_ok = matches!(validate(&small), Err(ValidationFailure::SizeOutOfRange { .. }));
    let large_ok = matches!(validate(&large), Err(ValidationFailure::SizeOutOfRange { .. }));
    results.push(TestResult {
        name: "boundary_size_range".into(),
        passed: small_ok && large_ok,
        detail: format!("6x6 rejected: {}, 12x12 rejected: {}", small_ok, large_ok),
    });

    let rect = generate_random(7, 9, &mut rng);
    let verdict = validate(&rect);
    results.push(TestResult {
        name: "boundary_not_square".into(),
        passed: verdict == Err(ValidationFailure::NotSquare { rows: 7, cols: 9 }),
        detail: format!("{:?}", verdict),
    });

    results.push(TestResult {
        name: "boundary_default_rules".into(),
        passed: validate_rules(&rules).is_empty(),
        detail: format!("{} config errors", validate_rules(&rules).len()),
    });

    results
}

/// 7x7 east-west corridors linked down column 3 (five open cells) plus
/// one more opening at (3, 1). Walls stay at the 40% floor.
fn six_open_cells_grid() -> Grid {
    let n = 7;
    let mut grid = Grid::new(n, n);
    for row in 0..n {
        for col in 0..n - 1 {
            let _ = grid.set_wall(Coord::new(row, col), Direction::East, false);
        }
    }
    let links = (0..n - 1).map(|row| (row, 3)).chain([(2, 1), (3, 1)]);
    for (row, col) in links {
        let _ = grid.set_wall(Coord::new(row, col), Direction::South, false);
    }
    let _ = grid.set_start(Coord::new(0, 0));
    let _ = set_end_point_opposite_start(&mut grid);
    grid
}

// ── 4. Corner mapping ───────────────────────────────────────────────────

fn validate_corner_mapping(_opts: &Options) -> Vec<TestResult> {
    println!("--- Corner Mapping ---");
    let mut results = Vec::new();

    for n in sizes() {
        let mut wrong = Vec::new();
        for corner in Corner::ALL {
            let mut grid = Grid::new(n, n);
            let start = corner.coord(n, n);
            let end = grid
                .set_start(start)
                .and_then(|_| set_end_point_opposite_start(&mut grid));
            let expected = Coord::new(n - 1 - start.row, n - 1 - start.col);
            if end != Ok(expected) {
                wrong.push(format!("{:?} -> {:?}", corner, end));
            }
        }
        results.push(TestResult {
            name: format!("corners_{}x{}", n, n),
            passed: wrong.is_empty(),
            detail: if wrong.is_empty() {
                "all four corners map diagonally".into()
            } else {
                wrong.join(", ")
            },
        });
    }

    results
}

// ── 5. Level files ──────────────────────────────────────────────────────

fn validate_level_roundtrip(opts: &Options) -> Vec<TestResult> {
    println!("--- Level Files ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(3));

    let mut mismatched = Vec::new();
    for n in sizes() {
        let config = GenerationConfig {
            size: n,
            holes: 1,
            ..Default::default()
        };
        let mut level = Level::new(generate(&config, &mut rng));
        level.mode = GameMode::Challenge;
        level.elements = ElementSelection {
            dogs: Some(DogSelection {
                count: 3,
                detection_size: 2,
            }),
            bones: None,
            shields: Some(3),
            specials: true,
        }
        .build(n);

        let outcome = level_to_json(&level).and_then(|json| level_from_json(&json));
        match outcome {
            Ok(loaded) if loaded == level && validate(&loaded.grid) == validate(&level.grid) => {}
            Ok(_) => mismatched.push(format!("{}x{} changed", n, n)),
            Err(e) => mismatched.push(format!("{}x{}: {}", n, n, e)),
        }
    }
    results.push(TestResult {
        name: "level_json_roundtrip".into(),
        passed: mismatched.is_empty(),
        detail: if mismatched.is_empty() {
            format!("{} levels survived save/load", sizes().count())
        } else {
            mismatched.join(", ")
        },
    });

    let truncated = r#"{"mode":"Relax","rows":7,"columns":7,"cellsSerialized":[]}"#;
    let rejected = level_from_json(truncated).is_err();
    results.push(TestResult {
        name: "level_rejects_short_record_list".into(),
        passed: rejected,
        detail: format!("empty record list rejected: {}", rejected),
    });

    results
}

// ── 6. Elements ─────────────────────────────────────────────────────────

fn validate_element_ranges(_opts: &Options) -> Vec<TestResult> {
    println!("--- Challenge Elements ---");
    let mut results = Vec::new();

    for n in sizes() {
        let ranges = ElementRanges::for_size(n);
        let greedy = ElementSelection {
            dogs: Some(DogSelection {
                count: usize::MAX,
                detection_size: usize::MAX,
            }),
            bones: Some(usize::MAX),
            shields: Some(usize::MAX),
            specials: true,
        };
        let counts = ElementCounts::tally(&greedy.build(n));
        let ok = counts.dogs == ranges.dog_max
            && counts.bones == ranges.bones_max
            && counts.shields == ranges.shield_max
            && counts.specials == n / 2
            && ranges.dog_min <= ranges.dog_max;
        results.push(TestResult {
            name: format!("elements_{}x{}", n, n),
            passed: ok,
            detail: format!(
                "dogs {}..={}, bones {}..={}, specials {}",
                ranges.dog_min, ranges.dog_max, ranges.bones_min, ranges.bones_max, ranges.special_count
            ),
        });
    }

    let no_dogs = ElementSelection {
        dogs: None,
        bones: Some(5),
        shields: Some(5),
        specials: false,
    };
    let empty = no_dogs.build(size::DEFAULT).is_empty();
    results.push(TestResult {
        name: "elements_require_dogs".into(),
        passed: empty,
        detail: format!("bones/shields without dogs dropped: {}", empty),
    });

    results
}

// ── 7. Editor ───────────────────────────────────────────────────────────

fn validate_editor(opts: &Options) -> Vec<TestResult> {
    println!("--- Editor Session ---");
    let mut results = Vec::new();

    let mut editor = MazeEditor::with_seed(opts.seed);
    let config = GenerationConfig {
        size: 9,
        ..Default::default()
    };
    let generated = editor.generate_valid(&config);
    results.push(TestResult {
        name: "editor_generate_valid".into(),
        passed: generated.is_ok(),
        detail: match &generated {
            Ok(valid) => format!(
                "solution {} cells, {} turns",
                valid.solution.len(),
                valid.solution.turns
            ),
            Err(e) => e.to_string(),
        },
    });

    let border = editor.toggle_wall(Coord::new(0, 4), Direction::North);
    let inner = editor.toggle_wall(Coord::new(4, 4), Direction::East);
    let symmetric = editor.grid().has_symmetric_walls();
    results.push(TestResult {
        name: "editor_toggle_wall".into(),
        passed: border.is_err() && inner.is_ok() && symmetric,
        detail: format!("border {:?}, inner {:?}, symmetric {}", border, inner, symmetric),
    });

    let moved = editor.set_start(Coord::new(8, 8));
    let refused = editor.set_start(Coord::new(4, 0));
    results.push(TestResult {
        name: "editor_corner_start".into(),
        passed: moved == Ok(Coord::new(0, 0)) && refused.is_err(),
        detail: format!("corner {:?}, edge {:?}", moved, refused),
    });

    results
}

// ── Rendering ───────────────────────────────────────────────────────────

/// ASCII picture of `grid`: `S` start, `G` goal.
fn render(grid: &Grid) -> String {
    let mut out = String::new();
    out.push('+');
    for _ in 0..grid.cols {
        out.push_str("--+");
    }
    out.push('\n');
    for row in 0..grid.rows {
        let mut line = String::from("|");
        let mut floor = String::from("+");
        for col in 0..grid.cols {
            let c = Coord::new(row, col);
            let Some(cell) = grid.cell(c) else {
                continue;
            };
            line.push_str(if cell.is_start {
                "S "
            } else if cell.is_goal {
                "G "
            } else {
                "  "
            });
            line.push(if cell.wall_east { '|' } else { ' ' });
            floor.push_str(if cell.wall_south { "--+" } else { "  +" });
        }
        out.push_str(&line);
        out.push('\n');
        out.push_str(&floor);
        out.push('\n');
    }
    out
}
