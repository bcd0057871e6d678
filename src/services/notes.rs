//! Services behind the notes pages.

use crate::domain::note::{NewNote, Note};
use crate::domain::query::NotesQuery;
use crate::domain::types::NoteId;
use crate::dto::notes::{NotesPageData, TagLink};
use crate::forms::notes::CreateNoteForm;
use crate::pagination::Paginated;
use crate::repository::{NoteListQuery, NoteReader, NoteWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads one page of notes for the listing state in the URL.
pub async fn load_notes_page<R>(
    repo: &R,
    query: NotesQuery,
    per_page: usize,
) -> ServiceResult<NotesPageData>
where
    R: NoteReader + ?Sized,
{
    let list_query = NoteListQuery::from_notes_query(&query, per_page);

    let page = repo.list_notes(&list_query).await.map_err(|err| {
        log::error!("Failed to list notes for {}: {err}", query.to_url());
        ServiceError::from(err)
    })?;

    let notes = Paginated::new(page.notes, query.page, page.total_pages, |p| {
        query.go_to(p).to_url()
    });
    let tags = TagLink::for_query(&query);

    Ok(NotesPageData { query, notes, tags })
}

/// Validates the creation form and sends the note to the notes API.
pub async fn create_note<R>(repo: &R, form: CreateNoteForm) -> ServiceResult<Note>
where
    R: NoteWriter + ?Sized,
{
    let new_note = NewNote::try_from(form).map_err(|err| {
        log::debug!("Rejected note form: {err}");
        ServiceError::from(err)
    })?;

    log::debug!(
        "Creating note {:?} tagged {}",
        new_note.title.as_str(),
        new_note.tag
    );
    let note = repo.create_note(&new_note).await.map_err(|err| {
        log::error!("Failed to create a note: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Created note {} tagged {}", note.id, note.tag);
    Ok(note)
}

/// Fetches a single note for the details page.
pub async fn load_note<R>(repo: &R, id: &str) -> ServiceResult<Note>
where
    R: NoteReader + ?Sized,
{
    let id = NoteId::new(id)?;

    repo.get_note(&id)
        .await
        .map_err(|err| {
            log::error!("Failed to load note {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Removes a note through the notes API.
pub async fn delete_note<R>(repo: &R, id: &str) -> ServiceResult<Note>
where
    R: NoteWriter + ?Sized,
{
    let id = NoteId::new(id)?;

    let note = repo.delete_note(&id).await.map_err(|err| {
        log::error!("Failed to delete note {id}: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Deleted note {}", note.id);
    Ok(note)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::note::NotePage;
    use crate::domain::query::TagFilter;
    use crate::domain::types::{NoteTag, PageNumber};
    use crate::forms::notes::TITLE_TOO_SHORT_MESSAGE;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn note(id: &str, tag: NoteTag) -> Note {
        Note {
            id: NoteId::new(id).unwrap(),
            title: format!("Note {id}"),
            content: String::new(),
            tag,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn form(title: &str) -> CreateNoteForm {
        CreateNoteForm {
            title: title.to_string(),
            content: "Body".to_string(),
            tag: "Work".to_string(),
        }
    }

    #[actix_web::test]
    async fn listing_passes_state_to_the_api() {
        let mut repo = MockRepository::new();
        repo.expect_list_notes()
            .withf(|q| {
                q.tag == Some(NoteTag::Work)
                    && q.search.as_deref() == Some("plan")
                    && q.pagination.page == 2
                    && q.pagination.per_page == 12
            })
            .times(1)
            .returning(|_| {
                Ok(NotePage {
                    notes: vec![note("a", NoteTag::Work)],
                    total_pages: 3,
                })
            });
        let query = NotesQuery::new(TagFilter::Tag(NoteTag::Work))
            .search("plan")
            .go_to(PageNumber::new(2).unwrap());

        let data = load_notes_page(&repo, query, 12).await.unwrap();

        assert_eq!(data.notes.items.len(), 1);
        assert_eq!(data.notes.total_pages, 3);
        assert!(data.notes.has_many_pages());
        assert_eq!(
            data.notes.next_url.as_deref(),
            Some("/notes/filter/Work?search=plan&page=3")
        );
        assert!(data.tags.iter().any(|t| t.label == "Work" && t.active));
    }

    #[actix_web::test]
    async fn listing_all_sends_no_tag() {
        let mut repo = MockRepository::new();
        repo.expect_list_notes()
            .withf(|q| q.tag.is_none() && q.search.is_none())
            .returning(|_| Ok(NotePage::default()));

        let data = load_notes_page(&repo, NotesQuery::from_request("all", None, None), 12)
            .await
            .unwrap();

        assert!(data.notes.items.is_empty());
        assert!(!data.notes.has_many_pages());
    }

    #[actix_web::test]
    async fn listing_failure_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_list_notes()
            .returning(|_| Err(RepositoryError::ConnectionError("refused".into())));

        let result = load_notes_page(&repo, NotesQuery::default(), 12).await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[actix_web::test]
    async fn invalid_form_never_reaches_the_api() {
        let mut repo = MockRepository::new();
        repo.expect_create_note().times(0);

        let result = create_note(&repo, form("ab")).await;

        match result {
            Err(ServiceError::Form(errors)) => {
                assert_eq!(errors.get("title"), Some(TITLE_TOO_SHORT_MESSAGE))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn valid_form_creates_note() {
        let mut repo = MockRepository::new();
        repo.expect_create_note()
            .withf(|n| n.title.as_str() == "Quarterly plan" && n.tag == NoteTag::Work)
            .times(1)
            .returning(|_| Ok(note("new", NoteTag::Work)));

        let created = create_note(&repo, form("Quarterly plan")).await.unwrap();

        assert_eq!(created.id.as_str(), "new");
    }

    #[actix_web::test]
    async fn api_rejection_surfaces_message() {
        let mut repo = MockRepository::new();
        repo.expect_create_note()
            .returning(|_| Err(RepositoryError::ValidationError("duplicate".into())));

        let result = create_note(&repo, form("Quarterly plan")).await;

        assert!(matches!(result, Err(ServiceError::Rejected(m)) if m == "duplicate"));
    }

    #[actix_web::test]
    async fn missing_note_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_note().returning(|_| Ok(None));

        let result = load_note(&repo, "missing").await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn blank_id_is_rejected_before_the_api() {
        let mut repo = MockRepository::new();
        repo.expect_get_note().times(0);
        repo.expect_delete_note().times(0);

        assert!(matches!(
            load_note(&repo, " ").await,
            Err(ServiceError::TypeConstraint(_))
        ));
        assert!(matches!(
            delete_note(&repo, "").await,
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[actix_web::test]
    async fn delete_maps_api_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_note()
            .returning(|_| Err(RepositoryError::NotFound));

        let result = delete_note(&repo, "gone").await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
