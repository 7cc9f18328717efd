//! Note service - validation and orchestration over a `NoteStore`

use crate::domain::filename::{reserved_character, sanitize_label};
use crate::domain::{authorize, Action, Note};
use crate::error::{NoteError, Result};
use crate::infrastructure::NoteStore;
use chrono::Utc;
use tracing::debug;

/// Request payload for create and update
#[derive(Debug, Clone, Default)]
pub struct NotePayload {
    pub title: String,
    pub grouping: String,
    pub note: String,
    pub deleted: bool,
}

/// CRUD operations over any storage backend. Mutations check ownership;
/// input labels are validated and sanitized before they reach the store.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    pub fn new(store: S) -> Self {
        NoteService { store }
    }

    /// List a user's notes (no bodies). `deleted` of `None` hides deleted
    /// notes; `group` filters by grouping label.
    pub fn list(
        &self,
        uid: &str,
        deleted: Option<bool>,
        group: Option<&str>,
    ) -> Result<Vec<Note>> {
        self.store.find_all_for_user(uid, deleted, group)
    }

    /// Fetch a single note, body included.
    pub fn get(&self, id: i64) -> Result<Note> {
        self.store.find(id)?.ok_or(NoteError::NotFound(id))
    }

    /// Create a note owned by `uid`. Empty titles are rejected before
    /// anything is persisted.
    pub fn create(&self, payload: &NotePayload, uid: &str) -> Result<Note> {
        let (name, grouping) = validated_labels(&payload.title, &payload.grouping)?;

        let note = Note::new(
            name,
            grouping,
            payload.note.clone(),
            uid.to_string(),
            Utc::now().timestamp(),
        );
        debug!(name = note.name.as_str(), uid, "creating note");
        self.store.create(note)
    }

    /// Full-field replace of an existing note. Only the owner may update.
    pub fn update(&self, id: i64, payload: &NotePayload, requester: &str) -> Result<Note> {
        let existing = self.get(id)?;
        authorize(requester, &existing.uid, Action::Update)?;

        let (name, grouping) = validated_labels(&payload.title, &payload.grouping)?;

        let note = Note {
            id,
            name,
            grouping,
            note: payload.note.clone(),
            mtime: Utc::now().timestamp(),
            deleted: payload.deleted,
            uid: existing.uid,
            shared: existing.shared,
        };
        debug!(id, "updating note");
        self.store.update(&note)
    }

    /// Rename a note in place. Only the owner may rename.
    pub fn rename(
        &self,
        id: i64,
        new_name: &str,
        new_grouping: &str,
        requester: &str,
    ) -> Result<Note> {
        let existing = self.get(id)?;
        authorize(requester, &existing.uid, Action::Rename)?;

        let (name, grouping) = validated_labels(new_name, new_grouping)?;
        debug!(id, name = name.as_str(), "renaming note");
        self.store.rename(id, &name, &grouping)
    }

    /// Remove a note and its overflow parts. Returns false if the id does
    /// not exist. Only the owner may delete.
    pub fn delete(&self, id: i64, requester: &str) -> Result<bool> {
        let Some(note) = self.store.find(id)? else {
            return Ok(false);
        };
        authorize(requester, &note.uid, Action::Delete)?;

        self.store.delete(&note)?;
        debug!(id, "deleted note");
        Ok(true)
    }
}

/// Validate and sanitize a title/grouping pair: the title must be
/// non-empty, path separators become '-', and the bracket characters
/// reserved by the filename encoding are rejected.
fn validated_labels(title: &str, grouping: &str) -> Result<(String, String)> {
    if title.is_empty() {
        return Err(NoteError::Validation("title is missing".to_string()));
    }

    let name = sanitize_label(title);
    let grouping = sanitize_label(grouping);

    if let Some(c) = reserved_character(&name) {
        return Err(NoteError::Validation(format!(
            "name contains reserved character '{}'",
            c
        )));
    }
    if let Some(c) = reserved_character(&grouping) {
        return Err(NoteError::Validation(format!(
            "grouping contains reserved character '{}'",
            c
        )));
    }

    Ok((name, grouping))
}
