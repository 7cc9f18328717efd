//! Ownership checks for mutating operations

use crate::error::{NoteError, Result};
use std::fmt;

/// What a requester wants to do with a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Update,
    Rename,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Update => "update",
            Action::Rename => "rename",
            Action::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// Allow the owner, deny everyone else. Called by every mutating service
/// operation; sharing-based grants are out of scope, so there is no second
/// chance after the owner check.
pub fn authorize(requester: &str, owner: &str, action: Action) -> Result<()> {
    if requester == owner {
        return Ok(());
    }

    Err(NoteError::Forbidden {
        user: requester.to_string(),
        owner: owner.to_string(),
        action: action.to_string(),
    })
}
