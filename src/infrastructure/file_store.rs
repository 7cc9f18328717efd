//! File-backed note store
//!
//! Notes live as `.htm` files in a flat `Notes/` directory; the filename
//! encodes grouping and name. Identity is a persistent surrogate key kept
//! in `.nextnote/index.toml` together with the owner and the soft-delete
//! flag, so ids never depend on directory listing order. Overflow chunks
//! of long bodies are stored as `<file>.htm.N` siblings, which the `.htm`
//! listing filter naturally skips.

use crate::domain::filename::{decode_filename, encode_filename, is_note_filename};
use crate::domain::parts::{needs_split, split_content, MAX_NOTE_FIELD_LENGTH};
use crate::domain::Note;
use crate::error::{NoteError, Result};
use crate::infrastructure::{NoteStore, RepositoryRoot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    id: i64,
    filename: String,
    uid: String,
    #[serde(default)]
    deleted: bool,
    /// Number of overflow part files next to the main file
    #[serde(default)]
    parts: u32,
}

/// Id index persisted at .nextnote/index.toml
#[derive(Debug, Serialize, Deserialize)]
struct Index {
    next_id: i64,
    #[serde(default, rename = "note")]
    entries: Vec<IndexEntry>,
}

impl Default for Index {
    fn default() -> Self {
        Index {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl Index {
    fn entry(&self, id: i64) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn entry_mut(&mut self, id: i64) -> Option<&mut IndexEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    fn has_filename(&self, filename: &str) -> bool {
        self.entries.iter().any(|e| e.filename == filename)
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// File system implementation of `NoteStore`
#[derive(Debug, Clone)]
pub struct FileStore {
    notes_dir: PathBuf,
    index_path: PathBuf,
}

impl FileStore {
    /// Open the file store for a repository root, creating the notes
    /// directory if needed.
    pub fn open(root: &RepositoryRoot) -> Result<Self> {
        let notes_dir = root.notes_dir();
        if !notes_dir.exists() {
            fs::create_dir_all(&notes_dir)?;
        }
        Ok(FileStore {
            notes_dir,
            index_path: root.index_path(),
        })
    }

    fn load_index(&self) -> Result<Index> {
        if !self.index_path.exists() {
            return Ok(Index::default());
        }
        let contents = fs::read_to_string(&self.index_path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn save_index(&self, index: &Index) -> Result<()> {
        if let Some(parent) = self.index_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = toml::to_string_pretty(index)?;
        fs::write(&self.index_path, contents)?;
        Ok(())
    }

    /// List note filenames in the notes directory (flat, `.htm` only)
    fn scan_filenames(&self) -> Result<Vec<String>> {
        let mut filenames = Vec::new();

        for entry in WalkDir::new(&self.notes_dir).max_depth(1) {
            let entry = entry.map_err(|e| NoteError::Storage(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if is_note_filename(name) {
                filenames.push(name.to_string());
            }
        }

        filenames.sort();
        Ok(filenames)
    }

    /// Bring the index in line with the directory: drop entries whose file
    /// vanished and, when an adopting owner is given, assign fresh ids to
    /// files that appeared externally. Returns true if the index changed.
    fn reconcile(&self, index: &mut Index, adopt_uid: Option<&str>) -> Result<bool> {
        let on_disk = self.scan_filenames()?;
        let mut changed = false;

        let before = index.entries.len();
        index
            .entries
            .retain(|e| on_disk.iter().any(|f| f == &e.filename));
        changed |= index.entries.len() != before;

        if let Some(uid) = adopt_uid {
            for filename in on_disk {
                if index.has_filename(&filename) {
                    continue;
                }
                let id = index.allocate_id();
                debug!(id, filename = filename.as_str(), "adopting external note file");
                index.entries.push(IndexEntry {
                    id,
                    filename,
                    uid: uid.to_string(),
                    deleted: false,
                    parts: 0,
                });
                changed = true;
            }
        }

        Ok(changed)
    }

    fn note_path(&self, filename: &str) -> PathBuf {
        self.notes_dir.join(filename)
    }

    fn part_path(&self, filename: &str, n: u32) -> PathBuf {
        self.notes_dir.join(format!("{}.{}", filename, n))
    }

    fn file_mtime(path: &Path) -> Result<i64> {
        let modified = fs::metadata(path)?.modified()?;
        let secs = modified
            .duration_since(UNIX_EPOCH)
            .map_err(|e| NoteError::Storage(format!("mtime before unix epoch: {}", e)))?
            .as_secs();
        Ok(secs as i64)
    }

    /// Write a body, splitting overflow into part files. Part files beyond
    /// the new count left over from a previous write are removed. Returns
    /// the new part count.
    fn write_body(&self, filename: &str, content: &str, old_parts: u32) -> Result<u32> {
        let main_path = self.note_path(filename);

        let new_parts = if needs_split(content) {
            let chunks = split_content(content, MAX_NOTE_FIELD_LENGTH);
            fs::write(&main_path, &chunks[0])?;
            for (n, chunk) in chunks.iter().enumerate().skip(1) {
                fs::write(self.part_path(filename, n as u32), chunk)?;
            }
            (chunks.len() - 1) as u32
        } else {
            fs::write(&main_path, content)?;
            0
        };

        for n in (new_parts + 1)..=old_parts {
            let stale = self.part_path(filename, n);
            if stale.exists() {
                fs::remove_file(stale)?;
            }
        }

        Ok(new_parts)
    }

    /// Read a body back, reassembling overflow parts in order.
    fn read_body(&self, entry: &IndexEntry) -> Result<String> {
        let mut body = fs::read_to_string(self.note_path(&entry.filename))?;
        for n in 1..=entry.parts {
            body.push_str(&fs::read_to_string(self.part_path(&entry.filename, n))?);
        }
        Ok(body)
    }

    /// Move a note file and its parts to a new filename.
    fn move_files(&self, entry: &IndexEntry, new_filename: &str) -> Result<()> {
        fs::rename(self.note_path(&entry.filename), self.note_path(new_filename))?;
        for n in 1..=entry.parts {
            fs::rename(
                self.part_path(&entry.filename, n),
                self.part_path(new_filename, n),
            )?;
        }
        Ok(())
    }

    fn entry_to_note(&self, entry: &IndexEntry, with_body: bool) -> Result<Note> {
        let (grouping, name) = decode_filename(&entry.filename);
        let body = if with_body {
            self.read_body(entry)?
        } else {
            String::new()
        };

        Ok(Note {
            id: entry.id,
            name,
            grouping,
            note: body,
            mtime: Self::file_mtime(&self.note_path(&entry.filename))?,
            deleted: entry.deleted,
            uid: entry.uid.clone(),
            shared: false,
        })
    }

    /// A destination filename is free if no index entry and no file claims it.
    fn ensure_destination_free(&self, index: &Index, filename: &str) -> Result<()> {
        if index.has_filename(filename) || self.note_path(filename).exists() {
            return Err(NoteError::Storage(format!(
                "destination already exists: {}",
                filename
            )));
        }
        Ok(())
    }
}

impl NoteStore for FileStore {
    fn find(&self, id: i64) -> Result<Option<Note>> {
        let mut index = self.load_index()?;

        let Some(entry) = index.entry(id).cloned() else {
            return Ok(None);
        };

        if !self.note_path(&entry.filename).exists() {
            // The file vanished underneath us; forget the entry.
            index.entries.retain(|e| e.id != id);
            self.save_index(&index)?;
            return Ok(None);
        }

        Ok(Some(self.entry_to_note(&entry, true)?))
    }

    fn find_all_for_user(
        &self,
        uid: &str,
        deleted: Option<bool>,
        group: Option<&str>,
    ) -> Result<Vec<Note>> {
        let mut index = self.load_index()?;
        if self.reconcile(&mut index, Some(uid))? {
            self.save_index(&index)?;
        }

        let mut notes = Vec::new();
        for entry in &index.entries {
            if entry.uid != uid {
                continue;
            }
            match deleted {
                None if entry.deleted => continue,
                Some(want) if entry.deleted != want => continue,
                _ => {}
            }
            let note = self.entry_to_note(entry, false)?;
            if let Some(g) = group {
                if note.grouping != g {
                    continue;
                }
            }
            notes.push(note);
        }

        notes.sort_by_key(|n| n.id);
        Ok(notes)
    }

    fn create(&self, note: Note) -> Result<Note> {
        let filename = encode_filename(&note.grouping, &note.name);
        let mut index = self.load_index()?;

        self.ensure_destination_free(&index, &filename)?;

        let parts = self.write_body(&filename, &note.note, 0)?;
        let id = index.allocate_id();
        debug!(id, filename = filename.as_str(), "created note file");

        index.entries.push(IndexEntry {
            id,
            filename: filename.clone(),
            uid: note.uid.clone(),
            deleted: note.deleted,
            parts,
        });
        self.save_index(&index)?;

        let mtime = Self::file_mtime(&self.note_path(&filename))?;
        Ok(Note { id, mtime, ..note })
    }

    fn update(&self, note: &Note) -> Result<Note> {
        let mut index = self.load_index()?;

        let Some(entry) = index.entry(note.id).cloned() else {
            return Err(NoteError::NotFound(note.id));
        };

        // A changed name/grouping moves the files before the body write,
        // so the old encoding never lingers as an orphan.
        let new_filename = encode_filename(&note.grouping, &note.name);
        if new_filename != entry.filename {
            self.ensure_destination_free(&index, &new_filename)?;
            self.move_files(&entry, &new_filename)?;
            debug!(
                id = note.id,
                from = entry.filename.as_str(),
                to = new_filename.as_str(),
                "renamed note file on update"
            );
        }

        let parts = self.write_body(&new_filename, &note.note, entry.parts)?;

        let slot = index.entry_mut(note.id).unwrap();
        slot.filename = new_filename.clone();
        slot.deleted = note.deleted;
        slot.parts = parts;
        self.save_index(&index)?;

        let mtime = Self::file_mtime(&self.note_path(&new_filename))?;
        Ok(Note {
            mtime,
            ..note.clone()
        })
    }

    fn rename(&self, id: i64, name: &str, grouping: &str) -> Result<Note> {
        let mut index = self.load_index()?;

        let Some(entry) = index.entry(id).cloned() else {
            return Err(NoteError::NotFound(id));
        };

        let new_filename = encode_filename(grouping, name);
        if new_filename != entry.filename {
            self.ensure_destination_free(&index, &new_filename)?;
            self.move_files(&entry, &new_filename)?;
            index.entry_mut(id).unwrap().filename = new_filename.clone();
            self.save_index(&index)?;
        }

        // Rewrite the main file so the mtime reflects the rename.
        let renamed = index.entry(id).unwrap().clone();
        let first_chunk = fs::read_to_string(self.note_path(&new_filename))?;
        fs::write(self.note_path(&new_filename), &first_chunk)?;

        self.entry_to_note(&renamed, true)
    }

    fn delete(&self, note: &Note) -> Result<()> {
        let mut index = self.load_index()?;

        let Some(entry) = index.entry(note.id).cloned() else {
            return Ok(());
        };

        let main_path = self.note_path(&entry.filename);
        if main_path.exists() {
            fs::remove_file(&main_path)?;
        }
        for n in 1..=entry.parts {
            let part = self.part_path(&entry.filename, n);
            if part.exists() {
                fs::remove_file(part)?;
            }
        }

        index.entries.retain(|e| e.id != note.id);
        self.save_index(&index)?;
        debug!(id = note.id, filename = entry.filename.as_str(), "deleted note file");
        Ok(())
    }
}
