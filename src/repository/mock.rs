//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::note::{NewNote, Note, NotePage};
use crate::domain::types::NoteId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{NoteListQuery, NoteReader, NoteWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl NoteReader for Repository {
        async fn list_notes(&self, query: &NoteListQuery) -> RepositoryResult<NotePage>;
        async fn get_note(&self, id: &NoteId) -> RepositoryResult<Option<Note>>;
    }

    #[async_trait]
    impl NoteWriter for Repository {
        async fn create_note(&self, note: &NewNote) -> RepositoryResult<Note>;
        async fn delete_note(&self, id: &NoteId) -> RepositoryResult<Note>;
    }
}
