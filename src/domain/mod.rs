//! Domain layer - Note entity and the rules around it

pub mod access;
pub mod filename;
pub mod note;
pub mod parts;

pub use access::{authorize, Action};
pub use note::Note;
