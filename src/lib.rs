//! nextnote - Note manager with pluggable storage
//!
//! CRUD note management with notes persisted either as flat `.htm` files
//! (filename encodes the grouping and name) or as SQLite rows, behind one
//! `NoteStore` capability. Long bodies are split into overflow parts and
//! reassembled on read.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::NoteError;
