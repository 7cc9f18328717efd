//! Output formatting utilities

use crate::domain::Note;
use crate::error::Result;
use chrono::DateTime;

fn format_mtime(mtime: i64) -> String {
    DateTime::from_timestamp(mtime, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a list of notes for display
pub fn format_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found\n".to_string();
    }

    let mut output = String::new();
    for note in notes {
        if note.grouping.is_empty() {
            output.push_str(&format!(
                "{:>4}  {}  {}\n",
                note.id,
                format_mtime(note.mtime),
                note.name
            ));
        } else {
            output.push_str(&format!(
                "{:>4}  {}  [{}] {}\n",
                note.id,
                format_mtime(note.mtime),
                note.grouping,
                note.name
            ));
        }
    }
    output
}

/// Format a single note with its body for display
pub fn format_note(note: &Note) -> String {
    let mut output = String::new();
    output.push_str(&format!("id:       {}\n", note.id));
    output.push_str(&format!("name:     {}\n", note.name));
    output.push_str(&format!("grouping: {}\n", note.grouping));
    output.push_str(&format!("mtime:    {}\n", format_mtime(note.mtime)));
    output.push_str(&format!("deleted:  {}\n", note.deleted));
    output.push_str(&format!("owner:    {}\n", note.uid));
    output.push('\n');
    output.push_str(&note.note);
    if !note.note.ends_with('\n') {
        output.push('\n');
    }
    output
}

/// Serialize a note as pretty JSON
pub fn note_to_json(note: &Note) -> Result<String> {
    Ok(serde_json::to_string_pretty(note)?)
}

/// Serialize a note list as pretty JSON
pub fn notes_to_json(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, name: &str, grouping: &str, body: &str) -> Note {
        Note {
            id,
            name: name.to_string(),
            grouping: grouping.to_string(),
            note: body.to_string(),
            mtime: 1700000000,
            deleted: false,
            uid: "alice".to_string(),
            shared: false,
        }
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_note_list(&[]);
        assert_eq!(output, "No notes found\n");
    }

    #[test]
    fn test_format_note_list() {
        let notes = vec![note(1, "Shopping", "Home", ""), note(2, "Plain", "", "")];

        let output = format_note_list(&notes);
        assert!(output.contains("[Home] Shopping"));
        assert!(output.contains("Plain"));
        // Grouping brackets only where a grouping exists
        assert!(!output.contains("[] Plain"));
    }

    #[test]
    fn test_format_note_includes_body() {
        let output = format_note(&note(3, "A", "G", "hello body"));
        assert!(output.contains("id:       3"));
        assert!(output.contains("name:     A"));
        assert!(output.contains("grouping: G"));
        assert!(output.contains("owner:    alice"));
        assert!(output.ends_with("hello body\n"));
    }

    #[test]
    fn test_note_to_json() {
        let json = note_to_json(&note(1, "Shopping", "Home", "milk")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["id"], 1);
        assert_eq!(parsed["name"], "Shopping");
        assert_eq!(parsed["grouping"], "Home");
        assert_eq!(parsed["note"], "milk");
    }

    #[test]
    fn test_notes_to_json_is_array() {
        let json = notes_to_json(&[note(1, "A", "", "")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["name"], "A");
    }
}
