//! Note entity

use serde::Serialize;

/// A user-owned text document with an optional group label.
///
/// `id` is a persistent surrogate key assigned by the storage backend.
/// `mtime` is unix seconds, set by the backend on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: i64,
    pub name: String,
    pub grouping: String,
    pub note: String,
    pub mtime: i64,
    pub deleted: bool,
    pub uid: String,
    pub shared: bool,
}

impl Note {
    /// Build a fresh, not-yet-persisted note. The id is assigned by the
    /// store on create; `shared` is always false for new notes.
    pub fn new(name: String, grouping: String, note: String, uid: String, mtime: i64) -> Self {
        Note {
            id: 0,
            name,
            grouping,
            note,
            mtime,
            deleted: false,
            uid,
            shared: false,
        }
    }
}
