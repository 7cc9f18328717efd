//! Configuration management

use crate::error::{NoteError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Notes as `.htm` files in a flat `Notes/` directory
    #[default]
    File,
    /// Notes as rows in a SQLite database
    Sqlite,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Backend::File),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(format!("Invalid backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: Backend,
    pub user: String,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(backend: Backend, user: Option<&str>) -> Self {
        Config {
            backend,
            user: user
                .map(|u| u.to_string())
                .unwrap_or_else(Self::detect_default_user),
            created: Utc::now(),
        }
    }

    /// Load config from .nextnote/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".nextnote").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NoteError::NotNoteDirectory(path.to_path_buf())
            } else {
                NoteError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| NoteError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .nextnote/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let marker_dir = path.join(".nextnote");
        let config_path = marker_dir.join("config.toml");

        // Ensure .nextnote directory exists
        if !marker_dir.exists() {
            fs::create_dir(&marker_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| NoteError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Resolve the acting user id: explicit override first, then the
    /// NEXTNOTE_USER environment variable, then the configured default.
    pub fn acting_user(&self, override_user: Option<&str>) -> String {
        if let Some(user) = override_user {
            return user.to_string();
        }
        std::env::var("NEXTNOTE_USER").unwrap_or_else(|_| self.user.clone())
    }

    /// Detect a default user id from the environment
    fn detect_default_user() -> String {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "nextnote".to_string())
    }
}
