use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;

use crate::domain::note::{NewNote, Note, NotePage};
use crate::domain::types::NoteId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{NoteListQuery, NoteReader, NoteWriter};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    page: usize,
    per_page: usize,
}

/// [`NoteReader`] and [`NoteWriter`] backed by the notes REST API.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpRepository {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let base_url = base_url.into();
        let base_url = Url::parse(&base_url).map_err(|e| {
            RepositoryError::Unexpected(format!("Invalid notes API URL {base_url:?}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::Unexpected(format!(
                "Notes API URL {base_url} cannot have a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Appends `segments` to the base URL, each percent-encoded as a single
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        log::debug!("{method} {url}");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::warn!("Notes API responded with {status}: {body}");
        Err(RepositoryError::from_status(status, &body))
    }
}

#[async_trait]
impl NoteReader for HttpRepository {
    async fn list_notes(&self, query: &NoteListQuery) -> RepositoryResult<NotePage> {
        let params = ListParams {
            tag: query.tag.map(|tag| tag.as_str()),
            search: query.search.as_deref(),
            page: query.pagination.page,
            per_page: query.pagination.per_page,
        };

        let response = self.request(Method::GET, &["notes"]).query(&params).send().await?;
        let page = Self::check(response).await?.json::<NotePage>().await?;

        Ok(page)
    }

    async fn get_note(&self, id: &NoteId) -> RepositoryResult<Option<Note>> {
        let response = self
            .request(Method::GET, &["notes", id.as_str()])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let note = Self::check(response).await?.json::<Note>().await?;
        Ok(Some(note))
    }
}

#[async_trait]
impl NoteWriter for HttpRepository {
    async fn create_note(&self, note: &NewNote) -> RepositoryResult<Note> {
        let response = self.request(Method::POST, &["notes"]).json(note).send().await?;
        let created = Self::check(response).await?.json::<Note>().await?;

        Ok(created)
    }

    async fn delete_note(&self, id: &NoteId) -> RepositoryResult<Note> {
        let response = self
            .request(Method::DELETE, &["notes", id.as_str()])
            .send()
            .await?;
        let deleted = Self::check(response).await?.json::<Note>().await?;

        Ok(deleted)
    }
}
