//! Overflow splitting for long note bodies
//!
//! Bodies longer than `MAX_NOTE_FIELD_LENGTH` characters do not fit the
//! primary storage slot and are split into sequential overflow parts.
//! Concatenating the parts in order reproduces the body byte-for-byte.

/// Maximum number of characters stored in the primary slot (2.5 MiB worth
/// of single-byte characters). Bodies above this are split.
pub const MAX_NOTE_FIELD_LENGTH: usize = 2_621_440;

/// Whether a body needs to be split into overflow parts.
pub fn needs_split(content: &str) -> bool {
    content.chars().count() > MAX_NOTE_FIELD_LENGTH
}

/// Split a body into chunks of at most `max_chars` characters, respecting
/// UTF-8 boundaries. The empty string yields no chunks.
pub fn split_content(content: &str, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0, "chunk size must be positive");

    let mut parts = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        let split_at = rest
            .char_indices()
            .nth(max_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(split_at);
        parts.push(chunk.to_string());
        rest = tail;
    }

    parts
}
