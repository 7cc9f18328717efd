//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod file_store;
pub mod root;
pub mod sqlite_store;
pub mod store;

pub use config::{Backend, Config};
pub use file_store::FileStore;
pub use root::RepositoryRoot;
pub use sqlite_store::SqliteStore;
pub use store::{open_store, NoteStore};
