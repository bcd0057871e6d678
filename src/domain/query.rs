//! Listing state carried in the URL: tag filter, search text and page.
//!
//! The query is immutable; every user interaction derives a new query so the
//! reset rules live in one place:
//!
//! - picking another tag clears the search text and returns to page one;
//! - typing a new search keeps the tag and returns to page one;
//! - paging keeps both tag and search.

use std::time::Duration;

use serde::Serialize;

use crate::domain::types::{NoteTag, PageNumber};

/// Slug used for the unfiltered listing.
pub const ALL_TAGS_SLUG: &str = "All";

/// Debounce applied when none or an out-of-range value is configured.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const MAX_SEARCH_DEBOUNCE_MS: u64 = 5_000;

/// Tag filter selected in the sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum TagFilter {
    #[default]
    All,
    Tag(NoteTag),
}

impl TagFilter {
    /// Resolves the filter from the path segments after `/notes/filter/`.
    ///
    /// Only the first segment counts. Empty, `all` and unknown slugs list
    /// every note.
    pub fn from_slug(slug: &str) -> Self {
        let first = slug.split('/').find(|s| !s.is_empty()).unwrap_or("");
        if first.eq_ignore_ascii_case(ALL_TAGS_SLUG) {
            return TagFilter::All;
        }
        match first.parse::<NoteTag>() {
            Ok(tag) => TagFilter::Tag(tag),
            Err(_) => {
                if !first.is_empty() {
                    log::debug!("Unknown tag slug {first:?}, listing all notes");
                }
                TagFilter::All
            }
        }
    }

    /// Tag to pass to the notes API, `None` for the unfiltered listing.
    pub const fn tag(self) -> Option<NoteTag> {
        match self {
            TagFilter::All => None,
            TagFilter::Tag(tag) => Some(tag),
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            TagFilter::All => ALL_TAGS_SLUG,
            TagFilter::Tag(tag) => tag.as_str(),
        }
    }

    /// The sidebar entries: `All` followed by every tag.
    pub fn choices() -> Vec<TagFilter> {
        std::iter::once(TagFilter::All)
            .chain(NoteTag::ALL.into_iter().map(TagFilter::Tag))
            .collect()
    }
}

impl From<TagFilter> for String {
    fn from(value: TagFilter) -> Self {
        value.slug().to_string()
    }
}

/// Current listing state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NotesQuery {
    pub tag: TagFilter,
    /// Trimmed search text, `None` when blank.
    pub search: Option<String>,
    pub page: PageNumber,
}

#[derive(Serialize)]
struct UrlParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
}

impl NotesQuery {
    /// First page of the given tag without a search.
    pub fn new(tag: TagFilter) -> Self {
        Self {
            tag,
            search: None,
            page: PageNumber::FIRST,
        }
    }

    /// Builds the query from raw request values.
    pub fn from_request(slug: &str, search: Option<&str>, page: Option<usize>) -> Self {
        Self {
            tag: TagFilter::from_slug(slug),
            search: normalize_search(search),
            page: PageNumber::from_request(page),
        }
    }

    /// Switches the tag filter, dropping the search text and the page.
    #[must_use]
    pub fn select_tag(&self, tag: TagFilter) -> Self {
        Self::new(tag)
    }

    /// Replaces the search text and returns to the first page.
    #[must_use]
    pub fn search(&self, text: &str) -> Self {
        Self {
            tag: self.tag,
            search: normalize_search(Some(text)),
            page: PageNumber::FIRST,
        }
    }

    /// Moves to another page keeping the filter and the search.
    #[must_use]
    pub fn go_to(&self, page: PageNumber) -> Self {
        Self {
            tag: self.tag,
            search: self.search.clone(),
            page,
        }
    }

    /// Path and query string of the listing page for this state.
    ///
    /// Default values (no search, first page) are left out.
    pub fn to_url(&self) -> String {
        let params = UrlParams {
            search: self.search.as_deref(),
            page: (self.page != PageNumber::FIRST).then_some(self.page.get()),
        };
        let path = format!("/notes/filter/{}", self.tag.slug());
        match serde_html_form::to_string(&params) {
            Ok(qs) if !qs.is_empty() => format!("{path}?{qs}"),
            Ok(_) => path,
            Err(err) => {
                log::error!("Failed to encode listing query: {err}");
                path
            }
        }
    }
}

fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Delay between the last keystroke in the search box and the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchDebounce(Duration);

impl SearchDebounce {
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 || ms > MAX_SEARCH_DEBOUNCE_MS {
            log::warn!(
                "Search debounce of {ms}ms is out of range, using {DEFAULT_SEARCH_DEBOUNCE_MS}ms"
            );
            return Self::default();
        }
        Self(Duration::from_millis(ms))
    }

    pub fn as_millis(self) -> u64 {
        self.0.as_millis() as u64
    }
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS))
    }
}
