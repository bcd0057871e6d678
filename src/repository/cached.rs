use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::NotesCache;
use crate::domain::note::{NewNote, Note, NotePage};
use crate::domain::types::NoteId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{NoteListQuery, NoteReader, NoteWriter};

/// Serves listing pages from a [`NotesCache`] and clears it after writes.
#[derive(Clone)]
pub struct CachedRepository<R> {
    inner: R,
    cache: Arc<NotesCache>,
}

impl<R> CachedRepository<R> {
    pub fn new(inner: R, cache: Arc<NotesCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<R> NoteReader for CachedRepository<R>
where
    R: NoteReader + Send + Sync,
{
    async fn list_notes(&self, query: &NoteListQuery) -> RepositoryResult<NotePage> {
        if let Some(page) = self.cache.get(query) {
            return Ok(page);
        }

        let generation = self.cache.generation();
        let page = self.inner.list_notes(query).await?;
        self.cache.put(query.clone(), page.clone(), generation);

        Ok(page)
    }

    async fn get_note(&self, id: &NoteId) -> RepositoryResult<Option<Note>> {
        self.inner.get_note(id).await
    }
}

#[async_trait]
impl<R> NoteWriter for CachedRepository<R>
where
    R: NoteWriter + Send + Sync,
{
    async fn create_note(&self, note: &NewNote) -> RepositoryResult<Note> {
        let created = self.inner.create_note(note).await?;
        self.cache.invalidate_all();

        Ok(created)
    }

    async fn delete_note(&self, id: &NoteId) -> RepositoryResult<Note> {
        let deleted = self.inner.delete_note(id).await?;
        self.cache.invalidate_all();

        Ok(deleted)
    }
}
