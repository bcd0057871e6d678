use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, routes, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::domain::query::{NotesQuery, SearchDebounce, TagFilter};
use crate::domain::types::NoteTag;
use crate::dto::notes::NoteFormData;
use crate::forms::notes::CreateNoteForm;
use crate::models::config::ServerConfig;
use crate::repository::AppRepository;
use crate::routes::{
    base_context, is_htmx, navigate, redirect, render_template, render_template_with_status,
};
use crate::services::{ServiceError, notes as notes_service};

const LIST_ERROR_MESSAGE: &str = "Something went wrong while fetching the notes.";
const NOT_FOUND_MESSAGE: &str = "Note not found.";

#[derive(Deserialize)]
pub struct ListingParams {
    search: Option<String>,
    page: Option<usize>,
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[routes]
#[get("/")]
#[get("/notes")]
#[get("/notes/filter")]
pub async fn index() -> impl Responder {
    redirect(&NotesQuery::default().to_url())
}

#[get("/notes/filter/{slug:.*}")]
#[allow(clippy::too_many_arguments)]
pub async fn show_notes(
    req: HttpRequest,
    slug: web::Path<String>,
    params: web::Query<ListingParams>,
    repo: web::Data<AppRepository>,
    server_config: web::Data<ServerConfig>,
    debounce: web::Data<SearchDebounce>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let query = NotesQuery::from_request(&slug, params.search.as_deref(), params.page);
    let htmx = is_htmx(&req);

    let mut context = base_context(&flash_messages, &query, **debounce);

    match notes_service::load_notes_page(repo.get_ref(), query, server_config.per_page()).await {
        Ok(data) => {
            context.insert("notes", &data.notes);
            context.insert("show_pagination", &data.notes.has_many_pages());
            let template = if htmx {
                "notes/list.html"
            } else {
                "notes/index.html"
            };
            render_template(&tera, template, &context)
        }
        Err(err) => {
            log::error!("Error fetching notes: {err}");
            context.insert("message", LIST_ERROR_MESSAGE);
            context.insert("details", &err.to_string());
            let template = if htmx {
                "notes/error_body.html"
            } else {
                "notes/error.html"
            };
            render_template_with_status(&tera, template, &context, StatusCode::BAD_GATEWAY)
        }
    }
}

fn render_form(tera: &Tera, data: &NoteFormData, status: StatusCode) -> HttpResponse {
    let mut context = Context::new();
    context.insert("form", &data.form);
    context.insert("errors", &data.errors);
    context.insert("message", &data.message);
    context.insert("tag_options", &NoteTag::ALL);
    render_template_with_status(tera, "notes/form.html", &context, status)
}

#[get("/notes/new")]
pub async fn note_form_modal(tera: web::Data<Tera>) -> impl Responder {
    render_form(&tera, &NoteFormData::default(), StatusCode::OK)
}

#[post("/notes")]
pub async fn create_note(
    req: HttpRequest,
    repo: web::Data<AppRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CreateNoteForm>,
) -> impl Responder {
    match notes_service::create_note(repo.get_ref(), form.clone()).await {
        Ok(note) => {
            FlashMessage::success(format!("Note \"{}\" created.", note.title)).send();
            navigate(&req, &NotesQuery::new(TagFilter::Tag(note.tag)).to_url())
        }
        Err(ServiceError::Form(errors)) => render_form(
            &tera,
            &NoteFormData::invalid(form, errors),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Err(ServiceError::Rejected(message)) => render_form(
            &tera,
            &NoteFormData::failed(form, message),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Err(err) => {
            log::error!("Failed to create the note: {err}");
            render_form(
                &tera,
                &NoteFormData::failed(form, "Could not create the note. Please try again."),
                StatusCode::BAD_GATEWAY,
            )
        }
    }
}

#[get("/notes/{note_id}")]
pub async fn show_note(
    note_id: web::Path<String>,
    repo: web::Data<AppRepository>,
    debounce: web::Data<SearchDebounce>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match notes_service::load_note(repo.get_ref(), &note_id).await {
        Ok(note) => {
            let query = NotesQuery::new(TagFilter::Tag(note.tag));
            let mut context = base_context(&flash_messages, &query, **debounce);
            context.insert("note", &note);
            render_template(&tera, "notes/detail.html", &context)
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            FlashMessage::error(NOT_FOUND_MESSAGE).send();
            redirect(&NotesQuery::default().to_url())
        }
        Err(err) => {
            log::error!("Failed to load note {note_id}: {err}");
            let mut context =
                base_context(&flash_messages, &NotesQuery::default(), **debounce);
            context.insert("message", "Something went wrong while fetching the note.");
            context.insert("details", &err.to_string());
            render_template_with_status(&tera, "notes/error.html", &context, StatusCode::BAD_GATEWAY)
        }
    }
}

#[post("/notes/{note_id}/delete")]
pub async fn delete_note(
    req: HttpRequest,
    note_id: web::Path<String>,
    repo: web::Data<AppRepository>,
) -> impl Responder {
    match notes_service::delete_note(repo.get_ref(), &note_id).await {
        Ok(note) => {
            FlashMessage::success(format!("Note \"{}\" deleted.", note.title)).send();
        }
        Err(ServiceError::NotFound | ServiceError::TypeConstraint(_)) => {
            FlashMessage::error(NOT_FOUND_MESSAGE).send();
        }
        Err(err) => {
            log::error!("Failed to delete note {note_id}: {err}");
            FlashMessage::error("Could not delete the note.").send();
        }
    }
    navigate(&req, &NotesQuery::default().to_url())
}
