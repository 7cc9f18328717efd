//! Initialize a note repository use case

use crate::error::Result;
use crate::infrastructure::{Backend, Config, RepositoryRoot, SqliteStore};
use std::fs;
use std::path::Path;

/// Initialize a new note repository at the specified path.
pub fn init(path: &Path, backend: Backend, user: Option<&str>) -> Result<()> {
    // Create the directory if it doesn't exist
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let root = RepositoryRoot::new(path.to_path_buf());

    // Create .nextnote marker directory
    root.initialize()?;

    // Create and save default config
    let config = Config::new(backend, user);
    root.save_config(&config)?;

    // Prepare the selected backend's storage
    match backend {
        Backend::File => {
            let notes_dir = root.notes_dir();
            if !notes_dir.exists() {
                fs::create_dir_all(notes_dir)?;
            }
        }
        Backend::Sqlite => {
            // Opening creates the database and its schema
            SqliteStore::open(&root.db_path())?;
        }
    }

    println!("Initialized nextnote repository at {}", path.display());
    println!("Backend: {:?}", backend);
    println!("User: {}", config.user);

    Ok(())
}
