//! Config management use case

use crate::error::{NoteError, Result};
use crate::infrastructure::{Backend, Config, RepositoryRoot};
use std::str::FromStr;

/// Service for managing repository configuration
pub struct ConfigService {
    root: RepositoryRoot,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(root: RepositoryRoot) -> Self {
        ConfigService { root }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.root.load_config()?;

        match key {
            "backend" => Ok(format!("{:?}", config.backend).to_lowercase()),
            "user" => Ok(config.user.clone()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(NoteError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: backend, user, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.root.load_config()?;

        match key {
            "backend" => {
                let backend = Backend::from_str(value).map_err(NoteError::Config)?;
                config.backend = backend;
            }
            "user" => {
                config.user = value.to_string();
            }
            "created" => {
                return Err(NoteError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(NoteError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: backend, user",
                    key
                )));
            }
        }

        self.root.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.root.load_config()
    }
}
