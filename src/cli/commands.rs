//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nextnote")]
#[command(about = "Note manager with file and SQLite storage backends", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Act as this user id (default: NEXTNOTE_USER or the configured user)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new note repository
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Storage backend (file, sqlite)
        #[arg(short, long, default_value = "file")]
        backend: String,
    },

    /// List notes
    List {
        /// Show deleted notes instead of active ones
        #[arg(long)]
        deleted: bool,

        /// Filter by grouping label
        #[arg(short, long)]
        group: Option<String>,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note, body included
    Get {
        id: i64,

        /// Print the note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        /// Note title (must be non-empty)
        #[arg(short, long)]
        title: String,

        /// Grouping label
        #[arg(short, long, default_value = "")]
        group: String,

        /// Note body
        #[arg(short, long, default_value = "")]
        note: String,

        /// Print the created note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace all fields of a note
    Update {
        id: i64,

        /// New title (must be non-empty)
        #[arg(short, long)]
        title: String,

        /// New grouping label
        #[arg(short, long, default_value = "")]
        group: String,

        /// New note body
        #[arg(short, long, default_value = "")]
        note: String,

        /// Mark the note as deleted (soft delete)
        #[arg(long)]
        deleted: bool,

        /// Print the updated note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename a note in place, keeping its id
    Rename {
        id: i64,

        /// New name
        new_name: String,

        /// New grouping label
        #[arg(short, long, default_value = "")]
        group: String,
    },

    /// Delete a note and any overflow parts
    Delete { id: i64 },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
