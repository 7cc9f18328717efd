//! Error types for nextnote

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the nextnote application
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Not a nextnote directory: {0}")]
    NotNoteDirectory(PathBuf),

    #[error("Note not found: {0}")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: user '{user}' may not {action} note owned by '{owner}'")]
    Forbidden {
        user: String,
        owner: String,
        action: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NoteError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NoteError::NotNoteDirectory(_) => 2,
            NoteError::NotFound(_) => 3,
            NoteError::Validation(_) => 4,
            NoteError::Forbidden { .. } => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NoteError::NotNoteDirectory(path) => {
                format!(
                    "Not a nextnote directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'nextnote init' in this directory to create a note repository\n\
                    • Navigate to an existing nextnote directory\n\
                    • Set NEXTNOTE_ROOT environment variable to your repository path",
                    path.display()
                )
            }
            NoteError::NotFound(id) => {
                format!(
                    "Note not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'nextnote list' to see available notes and their ids\n\
                    • Deleted notes are hidden by default; try 'nextnote list --deleted'",
                    id
                )
            }
            NoteError::Validation(msg) => {
                if msg.contains("title") {
                    format!(
                        "{}\n\n\
                        Every note needs a non-empty title:\n\
                        nextnote create --title 'Shopping' --group Home --note 'milk'",
                        msg
                    )
                } else {
                    format!(
                        "{}\n\n\
                        Note titles and group names may not contain '[' or ']'\n\
                        (they are reserved for filename encoding).",
                        msg
                    )
                }
            }
            NoteError::Config(msg) => {
                if msg.contains("Invalid backend") {
                    format!(
                        "{}\n\n\
                        Valid backends: file, sqlite\n\
                        Example: nextnote init --backend sqlite",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NoteError
pub type Result<T> = std::result::Result<T, NoteError>;
