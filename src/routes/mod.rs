//! HTTP handlers and the helpers they share.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::query::{NotesQuery, SearchDebounce};
use crate::dto::notes::TagLink;

pub mod notes;

/// Registers every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(notes::health)
        .service(notes::index)
        .service(notes::show_notes)
        .service(notes::note_form_modal)
        .service(notes::create_note)
        .service(notes::show_note)
        .service(notes::delete_note);
}

/// Maps flash message levels onto the CSS alert classes.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Whether the request was issued by htmx rather than a full navigation.
pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Leaves the current view: htmx follows `HX-Redirect`, browsers a 303.
pub fn navigate(req: &HttpRequest, location: &str) -> HttpResponse {
    if is_htmx(req) {
        HttpResponse::Ok()
            .insert_header(("HX-Redirect", location))
            .finish()
    } else {
        redirect(location)
    }
}

/// Context shared by every full page: alerts, sidebar and search settings.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    query: &NotesQuery,
    debounce: SearchDebounce,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("tags", &TagLink::for_query(query));
    context.insert("query", query);
    context.insert("search_debounce_ms", &debounce.as_millis());
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_template_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
