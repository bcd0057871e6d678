//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the note invariants (title and content bounds,
//! the closed tag set) so that once a value reaches the domain layer it can be
//! treated as trusted and sent to the notes API as is.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of characters in a note title.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum number of characters in a note title.
pub const TITLE_MAX_LEN: usize = 50;
/// Maximum number of characters in a note body.
pub const CONTENT_MAX_LEN: usize = 500;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is shorter than allowed.
    #[error("value must be at least {0} characters long")]
    TooShort(usize),
    /// Provided string is longer than allowed.
    #[error("value must be at most {0} characters long")]
    TooLong(usize),
    /// Identifier contains URL path syntax.
    #[error("invalid note id: {0}")]
    InvalidId(String),
    /// Provided tag is not one of the known note tags.
    #[error("unknown tag: {0}")]
    InvalidTag(String),
    /// Page numbers start at one.
    #[error("page must be greater than zero")]
    NonPositivePage,
}

/// Strips every HTML tag, keeping only the text content.
///
/// Ammonia serializes its output as HTML, so the entities it introduces are
/// decoded again. Templates escape on output.
fn sanitize(value: &str) -> String {
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(value)
        .to_string()
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Identifier assigned to a note by the notes API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps a trimmed, non-empty identifier.
    ///
    /// The id becomes one segment of the notes API path, so separators,
    /// query and fragment markers and dot segments are rejected.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\', '?', '#']) {
            return Err(TypeConstraintError::InvalidId(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of tags a note can carry.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// Every tag in display order.
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Todo,
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Meeting,
        NoteTag::Shopping,
    ];

    /// Canonical spelling used by the notes API.
    pub const fn as_str(self) -> &'static str {
        match self {
            NoteTag::Todo => "Todo",
            NoteTag::Work => "Work",
            NoteTag::Personal => "Personal",
            NoteTag::Meeting => "Meeting",
            NoteTag::Shopping => "Shopping",
        }
    }
}

impl Display for NoteTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteTag {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NoteTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TypeConstraintError::InvalidTag(trimmed.to_string()))
    }
}

impl TryFrom<String> for NoteTag {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoteTag> for String {
    fn from(value: NoteTag) -> Self {
        value.as_str().to_string()
    }
}

/// Sanitized note title between [`TITLE_MIN_LEN`] and [`TITLE_MAX_LEN`] characters.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct NoteTitle(String);

impl NoteTitle {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = sanitize(&value.into());
        let trimmed = sanitized.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            return Err(TypeConstraintError::EmptyString);
        }
        if len < TITLE_MIN_LEN {
            return Err(TypeConstraintError::TooShort(TITLE_MIN_LEN));
        }
        if len > TITLE_MAX_LEN {
            return Err(TypeConstraintError::TooLong(TITLE_MAX_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sanitized note body of at most [`CONTENT_MAX_LEN`] characters. May be empty.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq, Hash)]
pub struct NoteContent(String);

impl NoteContent {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = sanitize(&value.into());
        let trimmed = sanitized.trim();
        if trimmed.chars().count() > CONTENT_MAX_LEN {
            return Err(TypeConstraintError::TooLong(CONTENT_MAX_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One-based page number.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(usize);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        if value == 0 {
            return Err(TypeConstraintError::NonPositivePage);
        }
        Ok(Self(value))
    }

    /// Falls back to the first page for missing or zero input.
    pub fn from_request(value: Option<usize>) -> Self {
        value.and_then(|v| Self::new(v).ok()).unwrap_or(Self::FIRST)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}
