//! Access to the remote notes API.
//!
//! Services only see the [`NoteReader`] and [`NoteWriter`] traits. The
//! production implementation is [`HttpRepository`] wrapped in
//! [`CachedRepository`], which keeps recent listing pages and drops them
//! after every write.

use async_trait::async_trait;

use crate::domain::note::{NewNote, Note, NotePage};
use crate::domain::query::NotesQuery;
use crate::domain::types::{NoteId, NoteTag};
use crate::repository::errors::RepositoryResult;

pub mod cached;
pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use cached::CachedRepository;
pub use http::HttpRepository;

/// Repository used by the running server.
pub type AppRepository = CachedRepository<HttpRepository>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Parameters of a listing request. Doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteListQuery {
    pub tag: Option<NoteTag>,
    pub search: Option<String>,
    pub pagination: Pagination,
}

impl NoteListQuery {
    pub fn new(per_page: usize) -> Self {
        Self {
            tag: None,
            search: None,
            pagination: Pagination {
                page: 1,
                per_page,
            },
        }
    }

    pub fn tag(mut self, tag: NoteTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }

    /// Translates the listing state of a page into an API request.
    pub fn from_notes_query(query: &NotesQuery, per_page: usize) -> Self {
        let mut list_query = NoteListQuery::new(per_page).paginate(query.page.get(), per_page);
        if let Some(tag) = query.tag.tag() {
            list_query = list_query.tag(tag);
        }
        if let Some(search) = &query.search {
            list_query = list_query.search(search.clone());
        }
        list_query
    }
}

#[async_trait]
pub trait NoteReader {
    async fn list_notes(&self, query: &NoteListQuery) -> RepositoryResult<NotePage>;
    async fn get_note(&self, id: &NoteId) -> RepositoryResult<Option<Note>>;
}

#[async_trait]
pub trait NoteWriter {
    async fn create_note(&self, note: &NewNote) -> RepositoryResult<Note>;
    async fn delete_note(&self, id: &NoteId) -> RepositoryResult<Note>;
}
