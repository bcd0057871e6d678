use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{NoteContent, NoteId, NoteTag, NoteTitle};

/// A note as returned by the notes API.
///
/// Title and content are kept as plain strings: notes created by other
/// clients are displayed as stored, only new notes go through local checks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a note.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewNote {
    pub title: NoteTitle,
    pub content: NoteContent,
    pub tag: NoteTag,
}

impl NewNote {
    #[must_use]
    pub fn new(title: NoteTitle, content: NoteContent, tag: NoteTag) -> Self {
        Self {
            title,
            content,
            tag,
        }
    }
}

/// One page of the note listing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotePage {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total_pages: usize,
}
