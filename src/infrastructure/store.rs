//! The polymorphic note storage capability

use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::{Backend, FileStore, RepositoryRoot, SqliteStore};

/// Storage backend for notes. One implementation per backend; the service
/// layer is written once against this trait.
///
/// Listings do not carry note bodies; only `find` loads content (and
/// reassembles overflow parts).
pub trait NoteStore {
    /// Look up a single note by its surrogate key, body included.
    /// Deleted notes are still findable by id.
    fn find(&self, id: i64) -> Result<Option<Note>>;

    /// List a user's notes without bodies. `deleted` of `None` hides
    /// deleted notes; `Some(d)` lists exactly those with that flag.
    /// `group` filters by exact grouping label.
    fn find_all_for_user(
        &self,
        uid: &str,
        deleted: Option<bool>,
        group: Option<&str>,
    ) -> Result<Vec<Note>>;

    /// Persist a new note and assign its id. Returns the stored entity
    /// with the backend-set mtime.
    fn create(&self, note: Note) -> Result<Note>;

    /// Full-field replace of an existing note, located by id.
    /// A changed name/grouping moves the underlying storage along; no
    /// orphans are left behind.
    fn update(&self, note: &Note) -> Result<Note>;

    /// Rename a note in place: id preserved, mtime refreshed, the old
    /// encoding removed.
    fn rename(&self, id: i64, name: &str, grouping: &str) -> Result<Note>;

    /// Remove a note and any associated overflow parts. Succeeds if the
    /// note is already absent.
    fn delete(&self, note: &Note) -> Result<()>;
}

impl<T: NoteStore + ?Sized> NoteStore for Box<T> {
    fn find(&self, id: i64) -> Result<Option<Note>> {
        (**self).find(id)
    }

    fn find_all_for_user(
        &self,
        uid: &str,
        deleted: Option<bool>,
        group: Option<&str>,
    ) -> Result<Vec<Note>> {
        (**self).find_all_for_user(uid, deleted, group)
    }

    fn create(&self, note: Note) -> Result<Note> {
        (**self).create(note)
    }

    fn update(&self, note: &Note) -> Result<Note> {
        (**self).update(note)
    }

    fn rename(&self, id: i64, name: &str, grouping: &str) -> Result<Note> {
        (**self).rename(id, name, grouping)
    }

    fn delete(&self, note: &Note) -> Result<()> {
        (**self).delete(note)
    }
}

/// Open the store selected by the configured backend.
pub fn open_store(root: &RepositoryRoot, backend: Backend) -> Result<Box<dyn NoteStore>> {
    match backend {
        Backend::File => Ok(Box::new(FileStore::open(root)?)),
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(&root.db_path())?)),
    }
}
