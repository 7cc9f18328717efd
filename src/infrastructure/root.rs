//! Note repository root discovery
//!
//! A directory containing `.nextnote/` is a note repository root. The
//! marker directory holds the config, the file backend's id index and the
//! SQLite database; the file backend stores its notes in `Notes/` under
//! the root.

use crate::error::{NoteError, Result};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker directory
const MARKER_DIR: &str = ".nextnote";

/// Name of the notes folder used by the file backend
pub const NOTES_FOLDER: &str = "Notes";

/// A discovered (or to-be-initialized) note repository root
#[derive(Debug, Clone)]
pub struct RepositoryRoot {
    pub root: PathBuf,
}

impl RepositoryRoot {
    /// Create a root handle for the given directory
    pub fn new(root: PathBuf) -> Self {
        RepositoryRoot { root }
    }

    /// Discover the repository root: NEXTNOTE_ROOT environment variable
    /// first, then walking up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("NEXTNOTE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_marker(&path) {
                return Ok(RepositoryRoot::new(path));
            } else {
                return Err(NoteError::Config(format!(
                    "NEXTNOTE_ROOT is set to '{}' but no .nextnote directory found. \
                    Run 'nextnote init' in that directory or unset NEXTNOTE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the repository root by walking up from a starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_marker(&current) {
                return Ok(RepositoryRoot::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(NoteError::NotNoteDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_marker(path: &Path) -> bool {
        path.join(MARKER_DIR).is_dir()
    }

    /// Check if the marker directory exists
    pub fn is_initialized(&self) -> bool {
        Self::has_marker(&self.root)
    }

    /// Create the marker directory
    pub fn initialize(&self) -> Result<()> {
        let marker = self.marker_dir();

        if marker.exists() {
            return Err(NoteError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&marker)?;
        Ok(())
    }

    /// Path of the `.nextnote` marker directory
    pub fn marker_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR)
    }

    /// Directory holding the file backend's note files
    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_FOLDER)
    }

    /// Path of the file backend's id index
    pub fn index_path(&self) -> PathBuf {
        self.marker_dir().join("index.toml")
    }

    /// Path of the SQLite backend's database
    pub fn db_path(&self) -> PathBuf {
        self.marker_dir().join("notes.db")
    }

    /// Load configuration from .nextnote/config.toml
    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    /// Save configuration to .nextnote/config.toml
    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }
}
