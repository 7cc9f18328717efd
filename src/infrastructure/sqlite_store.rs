//! SQLite-backed note store
//!
//! Mirrors the file backend behind the same trait: a `notes` table with
//! one row per note and a `note_parts` table holding overflow chunks of
//! bodies longer than the field limit. Parts are inserted in split order
//! and read back by rowid, so concatenation reproduces the body.

use crate::domain::parts::{needs_split, split_content, MAX_NOTE_FIELD_LENGTH};
use crate::domain::Note;
use crate::error::{NoteError, Result};
use crate::infrastructure::NoteStore;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// SQLite implementation of `NoteStore`
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (and if necessary create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                grouping TEXT NOT NULL DEFAULT '',
                note TEXT NOT NULL DEFAULT '',
                mtime INTEGER NOT NULL,
                deleted INTEGER NOT NULL DEFAULT 0,
                uid TEXT NOT NULL,
                shared INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS note_parts (
                note_id INTEGER NOT NULL,
                content TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_note_parts_note_id
                ON note_parts (note_id);",
        )
    }

    fn read_parts(&self, note_id: i64) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT content FROM note_parts WHERE note_id = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map(params![note_id], |row| row.get::<_, String>(0))?;

        let mut parts = Vec::new();
        for part in rows {
            parts.push(part?);
        }
        Ok(parts)
    }

    fn delete_parts(&self, note_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM note_parts WHERE note_id = ?1", params![note_id])?;
        Ok(())
    }

    fn insert_parts(&self, note_id: i64, parts: &[String]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO note_parts (note_id, content) VALUES (?1, ?2)")?;
        for part in parts {
            stmt.execute(params![note_id, part])?;
        }
        Ok(())
    }

    /// Split an over-limit body for storage. Returns the value for the
    /// `note` column and the overflow chunks (empty when no split needed).
    fn storable_body(body: &str) -> (String, Vec<String>) {
        if needs_split(body) {
            (
                String::new(),
                split_content(body, MAX_NOTE_FIELD_LENGTH),
            )
        } else {
            (body.to_string(), Vec::new())
        }
    }
}

impl NoteStore for SqliteStore {
    fn find(&self, id: i64) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                "SELECT id, name, grouping, note, mtime, deleted, uid, shared
                 FROM notes WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Note {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        grouping: row.get(2)?,
                        note: row.get(3)?,
                        mtime: row.get(4)?,
                        deleted: row.get(5)?,
                        uid: row.get(6)?,
                        shared: row.get(7)?,
                    })
                },
            )
            .optional()?;

        let Some(mut note) = note else {
            return Ok(None);
        };

        let parts = self.read_parts(id)?;
        if !parts.is_empty() {
            note.note = parts.concat();
        }

        Ok(Some(note))
    }

    fn find_all_for_user(
        &self,
        uid: &str,
        deleted: Option<bool>,
        group: Option<&str>,
    ) -> Result<Vec<Note>> {
        // None hides deleted notes, Some(d) selects exactly flag d
        let deleted_flag = deleted.unwrap_or(false);

        let mut sql = String::from(
            "SELECT id, name, grouping, mtime, deleted, uid, shared
             FROM notes WHERE uid = ?1 AND deleted = ?2",
        );
        if group.is_some() {
            sql.push_str(" AND grouping = ?3");
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn.prepare(&sql)?;
        let map_row = |row: &rusqlite::Row<'_>| {
            Ok(Note {
                id: row.get(0)?,
                name: row.get(1)?,
                grouping: row.get(2)?,
                note: String::new(),
                mtime: row.get(3)?,
                deleted: row.get(4)?,
                uid: row.get(5)?,
                shared: row.get(6)?,
            })
        };

        let rows = match group {
            Some(g) => stmt.query_map(params![uid, deleted_flag, g], map_row)?,
            None => stmt.query_map(params![uid, deleted_flag], map_row)?,
        };

        let mut notes = Vec::new();
        for note in rows {
            notes.push(note?);
        }
        Ok(notes)
    }

    fn create(&self, note: Note) -> Result<Note> {
        let (stored, parts) = Self::storable_body(&note.note);

        self.conn.execute(
            "INSERT INTO notes (name, grouping, note, mtime, deleted, uid, shared)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                note.name,
                note.grouping,
                stored,
                note.mtime,
                note.deleted,
                note.uid,
                note.shared,
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        if !parts.is_empty() {
            self.insert_parts(id, &parts)?;
        }

        debug!(id, name = note.name.as_str(), "inserted note row");
        Ok(Note { id, ..note })
    }

    fn update(&self, note: &Note) -> Result<Note> {
        self.delete_parts(note.id)?;

        let (stored, parts) = Self::storable_body(&note.note);

        let changed = self.conn.execute(
            "UPDATE notes SET name = ?1, grouping = ?2, note = ?3,
             mtime = ?4, deleted = ?5 WHERE id = ?6",
            params![
                note.name,
                note.grouping,
                stored,
                note.mtime,
                note.deleted,
                note.id,
            ],
        )?;
        if changed == 0 {
            return Err(NoteError::NotFound(note.id));
        }

        if !parts.is_empty() {
            self.insert_parts(note.id, &parts)?;
        }

        Ok(note.clone())
    }

    fn rename(&self, id: i64, name: &str, grouping: &str) -> Result<Note> {
        let changed = self.conn.execute(
            "UPDATE notes SET name = ?1, grouping = ?2, mtime = ?3 WHERE id = ?4",
            params![name, grouping, Utc::now().timestamp(), id],
        )?;
        if changed == 0 {
            return Err(NoteError::NotFound(id));
        }

        self.find(id)?.ok_or(NoteError::NotFound(id))
    }

    fn delete(&self, note: &Note) -> Result<()> {
        self.delete_parts(note.id)?;
        self.conn
            .execute("DELETE FROM notes WHERE id = ?1", params![note.id])?;
        debug!(id = note.id, "deleted note row");
        Ok(())
    }
}
