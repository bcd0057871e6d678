//! DTOs shaped for the notes templates.

use serde::Serialize;

use crate::domain::note::Note;
use crate::domain::query::{NotesQuery, TagFilter};
use crate::forms::FieldErrors;
use crate::forms::notes::CreateNoteForm;
use crate::pagination::Paginated;

/// Sidebar entry for one tag filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub label: &'static str,
    pub url: String,
    pub active: bool,
}

impl TagLink {
    /// Links for `All` and every tag, each one resetting search and page.
    pub fn for_query(query: &NotesQuery) -> Vec<TagLink> {
        TagFilter::choices()
            .into_iter()
            .map(|tag| TagLink {
                label: tag.slug(),
                url: query.select_tag(tag).to_url(),
                active: tag == query.tag,
            })
            .collect()
    }
}

/// Data required to render the notes listing.
#[derive(Debug)]
pub struct NotesPageData {
    /// Listing state the page was rendered for.
    pub query: NotesQuery,
    /// Current page of notes with its navigation.
    pub notes: Paginated<Note>,
    pub tags: Vec<TagLink>,
}

/// Data required to render the note creation modal.
#[derive(Debug, Default, Serialize)]
pub struct NoteFormData {
    pub form: CreateNoteForm,
    pub errors: FieldErrors,
    /// Form-level message, e.g. when the notes API rejects the request.
    pub message: Option<String>,
}

impl NoteFormData {
    pub fn invalid(form: CreateNoteForm, errors: FieldErrors) -> Self {
        Self {
            form,
            errors,
            message: None,
        }
    }

    pub fn failed(form: CreateNoteForm, message: impl Into<String>) -> Self {
        Self {
            form,
            errors: FieldErrors::default(),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{NoteTag, PageNumber};

    #[test]
    fn tag_links_reset_search_and_page() {
        let query = NotesQuery::new(TagFilter::Tag(NoteTag::Work))
            .search("plan")
            .go_to(PageNumber::new(4).unwrap());

        let links = TagLink::for_query(&query);

        assert_eq!(links.len(), 6);
        assert_eq!(links[0].url, "/notes/filter/All");
        assert!(!links[0].active);
        let work = links.iter().find(|l| l.label == "Work").unwrap();
        assert!(work.active);
        assert_eq!(work.url, "/notes/filter/Work");
    }
}
