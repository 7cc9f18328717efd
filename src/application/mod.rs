//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod service;

pub use manage_config::ConfigService;
pub use service::{NotePayload, NoteService};
