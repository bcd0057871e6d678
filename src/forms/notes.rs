//! The note creation form shown in the modal.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::note::NewNote;
use crate::domain::types::{
    NoteContent, NoteTag, NoteTitle, TITLE_MAX_LEN, TITLE_MIN_LEN, TypeConstraintError,
};
use crate::forms::{FieldErrors, FormError};

pub const REQUIRED_MESSAGE: &str = "Required field";
pub const TITLE_TOO_SHORT_MESSAGE: &str = "Too Short!";
pub const TITLE_TOO_LONG_MESSAGE: &str = "Too Long!";
pub const CONTENT_TOO_LONG_MESSAGE: &str = "Too long";
pub const INVALID_TAG_MESSAGE: &str = "Invalid tag";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if len == 0 {
        Err(error("required", REQUIRED_MESSAGE))
    } else if len < TITLE_MIN_LEN {
        Err(error("length", TITLE_TOO_SHORT_MESSAGE))
    } else if len > TITLE_MAX_LEN {
        Err(error("length", TITLE_TOO_LONG_MESSAGE))
    } else {
        Ok(())
    }
}

fn validate_tag(tag: &str) -> Result<(), ValidationError> {
    if tag.trim().is_empty() {
        return Err(error("required", REQUIRED_MESSAGE));
    }
    tag.parse::<NoteTag>()
        .map(|_| ())
        .map_err(|_| error("one_of", INVALID_TAG_MESSAGE))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
/// Form data for creating a note.
pub struct CreateNoteForm {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Too long"))]
    pub content: String,
    #[serde(default)]
    #[validate(custom(function = "validate_tag"))]
    pub tag: String,
}

impl Default for CreateNoteForm {
    /// Values the modal opens with.
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: NoteTag::default().to_string(),
        }
    }
}

/// Maps a rejected value object back onto the form field it came from.
fn constraint_message(err: &TypeConstraintError, too_long: &'static str) -> &'static str {
    match err {
        TypeConstraintError::EmptyString => REQUIRED_MESSAGE,
        TypeConstraintError::TooShort(_) => TITLE_TOO_SHORT_MESSAGE,
        TypeConstraintError::TooLong(_) => too_long,
        TypeConstraintError::InvalidTag(_) => INVALID_TAG_MESSAGE,
        TypeConstraintError::InvalidId(_) | TypeConstraintError::NonPositivePage => "Invalid value",
    }
}

impl TryFrom<CreateNoteForm> for NewNote {
    type Error = FormError;

    /// Validates the raw input, then builds the sanitized payload.
    ///
    /// Sanitizing can shorten the title (markup is dropped), so the value
    /// objects are checked again after the form rules pass.
    fn try_from(form: CreateNoteForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut errors = FieldErrors::new();

        let title = NoteTitle::new(form.title)
            .map_err(|err| errors.insert("title", constraint_message(&err, TITLE_TOO_LONG_MESSAGE)))
            .ok();
        let content = NoteContent::new(form.content)
            .map_err(|err| {
                errors.insert("content", constraint_message(&err, CONTENT_TOO_LONG_MESSAGE))
            })
            .ok();
        let tag = form
            .tag
            .parse::<NoteTag>()
            .map_err(|err| errors.insert("tag", constraint_message(&err, INVALID_TAG_MESSAGE)))
            .ok();

        match (title, content, tag) {
            (Some(title), Some(content), Some(tag)) => Ok(NewNote::new(title, content, tag)),
            _ => Err(FormError::Invalid(errors)),
        }
    }
}
