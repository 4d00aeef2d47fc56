//! Save/Load functionality for levels
//!
//! Single levels are stored as pretty-printed JSON in the layout the game
//! already reads (see [`stepmaze_logic::level::LevelFile`]). A whole level
//! library can also be snapshotted with bincode, behind a format version.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use stepmaze_logic::level::{Level, LevelError, LevelFile};

/// Version number for library snapshots (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

// ── Single levels (JSON) ────────────────────────────────────────────────

/// Write `level` as JSON.
pub fn save_level_json<W: Write>(writer: W, level: &Level) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, &level.to_file())?;
    Ok(())
}

/// Read a JSON level. Structural problems in the file surface as
/// [`SaveError::Level`]; whether the maze itself is playable is the
/// validator's call.
pub fn load_level_json<R: Read>(reader: R) -> Result<Level, SaveError> {
    let file: LevelFile = serde_json::from_reader(reader)?;
    Ok(Level::from_file(file)?)
}

pub fn level_to_json(level: &Level) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&level.to_file())?)
}

pub fn level_from_json(json: &str) -> Result<Level, SaveError> {
    let file: LevelFile = serde_json::from_str(json)?;
    Ok(Level::from_file(file)?)
}

pub fn save_level_file(path: impl AsRef<Path>, level: &Level) -> Result<(), SaveError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    save_level_json(&mut writer, level)?;
    writer.flush()?;
    log::info!("Saved {}x{} level to {}", level.grid.rows, level.grid.cols, path.display());
    Ok(())
}

pub fn load_level_file(path: impl AsRef<Path>) -> Result<Level, SaveError> {
    let path = path.as_ref();
    let level = load_level_json(BufReader::new(File::open(path)?))?;
    log::info!(
        "Loaded {}x{} {} level from {}",
        level.grid.rows,
        level.grid.cols,
        level.mode.as_str(),
        path.display()
    );
    Ok(level)
}

// ── Level library (bincode) ─────────────────────────────────────────────

/// A named level.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLevel {
    pub name: String,
    pub level: Level,
}

/// An ordered collection of named levels. Names are unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelLibrary {
    entries: Vec<NamedLevel>,
}

impl LevelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the level called `name`. Returns the replaced
    /// level, if any.
    pub fn insert(&mut self, name: impl Into<String>, level: Level) -> Option<Level> {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            return Some(std::mem::replace(&mut entry.level, level));
        }
        self.entries.push(NamedLevel { name, level });
        None
    }

    pub fn get(&self, name: &str) -> Option<&Level> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.level)
    }

    pub fn remove(&mut self, name: &str) -> Option<Level> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index).level)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedLevel> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serializable snapshot of a library
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub levels: Vec<SavedLevel>,
}

#[derive(Serialize, Deserialize)]
pub struct SavedLevel {
    pub name: String,
    pub file: LevelFile,
}

/// Save a library snapshot to a writer
pub fn save_library<W: Write>(writer: W, library: &LevelLibrary) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        levels: library
            .iter()
            .map(|entry| SavedLevel {
                name: entry.name.clone(),
                file: entry.level.to_file(),
            })
            .collect(),
    };
    bincode::serialize_into(writer, &save_data)?;
    log::debug!("Saved library snapshot with {} levels", library.len());
    Ok(())
}

/// Load a library snapshot from a reader
pub fn load_library<R: Read>(reader: R) -> Result<LevelLibrary, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut library = LevelLibrary::new();
    for saved in save_data.levels {
        library.insert(saved.name, Level::from_file(saved.file)?);
    }
    Ok(library)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
    Level(LevelError),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<LevelError> for SaveError {
    fn from(e: LevelError) -> Self {
        SaveError::Level(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Json(e) => write!(f, "Level JSON error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Level(e) => write!(f, "Invalid level file: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Json(e) => Some(e),
            SaveError::Bincode(e) => Some(e.as_ref()),
            SaveError::Level(e) => Some(e),
            SaveError::VersionMismatch { .. } => None,
        }
    }
}
