#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use notehub_web::cache::NotesCache;
use notehub_web::models::config::ServerConfig;
use notehub_web::repository::{AppRepository, CachedRepository, HttpRepository};
use serde_json::{Value, json};
use tera::Tera;

pub const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
pub const TOKEN: &str = "test-token";

pub fn server_config(api_url: &str) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        templates_dir: "templates/**/*".to_string(),
        assets_dir: "./assets".to_string(),
        secret: SECRET.to_string(),
        notes_api_url: api_url.to_string(),
        notes_api_token: Some(TOKEN.to_string()),
        request_timeout_secs: 5,
        per_page: 12,
        search_debounce_ms: 300,
        cache_ttl_secs: 60,
        cache_capacity: 16,
    }
}

pub fn http_repository(api_url: &str) -> HttpRepository {
    HttpRepository::new(api_url, Some(TOKEN.to_string()), Duration::from_secs(5))
        .expect("http client")
}

pub fn repository(api_url: &str) -> AppRepository {
    CachedRepository::new(
        http_repository(api_url),
        Arc::new(NotesCache::new(16, Duration::from_secs(60))),
    )
}

pub fn tera() -> Tera {
    Tera::new("templates/**/*").expect("templates")
}

pub fn note_json(id: &str, title: &str, tag: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("Content of {title}"),
        "tag": tag,
        "createdAt": "2024-02-12T18:46:31Z",
        "updatedAt": "2024-02-12T18:46:31Z"
    })
}

pub fn page_json(notes: Vec<Value>, total_pages: usize) -> Value {
    json!({ "notes": notes, "totalPages": total_pages })
}

/// Initializes the application against a notes API at the given URL.
macro_rules! test_app {
    ($api_url:expr) => {{
        let api_url: &str = $api_url;
        let config = common::server_config(api_url);
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(notehub_web::flash_messages_framework(common::SECRET).unwrap())
                .configure(notehub_web::routes::configure)
                .app_data(actix_web::web::Data::new(common::tera()))
                .app_data(actix_web::web::Data::new(common::repository(api_url)))
                .app_data(actix_web::web::Data::new(
                    notehub_web::domain::query::SearchDebounce::from_millis(
                        config.search_debounce_ms,
                    ),
                ))
                .app_data(actix_web::web::Data::new(config)),
        )
        .await
    }};
}
