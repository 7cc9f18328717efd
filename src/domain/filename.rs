//! Filename encoding for the file backend
//!
//! Notes are stored as `[<group>] <name>.htm` when a grouping is set and
//! `<name>.htm` otherwise. The encoding must be reversible, so `[` and `]`
//! are reserved characters and path separators are sanitized away before a
//! label ever reaches this module.

use regex::Regex;
use std::sync::OnceLock;

/// File extension for stored notes
pub const NOTE_EXTENSION: &str = ".htm";

/// Regex for stripping a trailing 3-4 character extension (".htm", ".html")
fn extension_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\.[^.\s]{3,4}$").unwrap())
}

/// Encode a grouping and name into a note filename.
pub fn encode_filename(grouping: &str, name: &str) -> String {
    if grouping.is_empty() {
        format!("{}{}", name, NOTE_EXTENSION)
    } else {
        format!("[{}] {}{}", grouping, name, NOTE_EXTENSION)
    }
}

/// Decode a note filename into its (grouping, name) pair.
///
/// Strips the extension, then treats a leading `[...]` segment as the
/// grouping and the trimmed remainder as the name.
pub fn decode_filename(filename: &str) -> (String, String) {
    let stem = extension_regex().replace(filename, "");

    if let Some(rest) = stem.strip_prefix('[') {
        if let Some(end) = rest.find(']') {
            let grouping = rest[..end].to_string();
            let name = rest[end + 1..].trim().to_string();
            return (grouping, name);
        }
    }

    (String::new(), stem.to_string())
}

/// Check whether a filename is a note file.
pub fn is_note_filename(filename: &str) -> bool {
    filename.ends_with(NOTE_EXTENSION)
}

/// Replace path separators in a name or grouping label with '-'.
pub fn sanitize_label(label: &str) -> String {
    label.replace(['/', '\\'], "-")
}

/// Check a label for characters reserved by the filename encoding.
/// Returns the offending character if there is one.
pub fn reserved_character(label: &str) -> Option<char> {
    label.chars().find(|c| *c == '[' || *c == ']')
}
