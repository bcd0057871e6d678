use std::sync::Arc;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::cache::NotesCache;
use crate::domain::query::SearchDebounce;
use crate::models::config::ServerConfig;
use crate::repository::{AppRepository, CachedRepository, HttpRepository};

pub mod cache;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod services;

/// Minimum length of the cookie signing secret accepted by [`Key::from`].
const MIN_SECRET_LEN: usize = 64;

/// Builds the flash message middleware backed by signed cookies.
pub fn flash_messages_framework(secret: &str) -> std::io::Result<FlashMessagesFramework> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(std::io::Error::other(format!(
            "secret must be at least {MIN_SECRET_LEN} bytes long"
        )));
    }
    let secret_key = Key::from(secret.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    Ok(FlashMessagesFramework::builder(message_store).build())
}

/// Creates the notes API client with its listing cache.
pub fn build_repository(server_config: &ServerConfig) -> std::io::Result<AppRepository> {
    let http = HttpRepository::new(
        server_config.notes_api_url.clone(),
        server_config.notes_api_token.clone(),
        server_config.request_timeout(),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to create notes API client: {e}")))?;

    let cache = NotesCache::new(server_config.cache_capacity, server_config.cache_ttl());
    Ok(CachedRepository::new(http, Arc::new(cache)))
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = build_repository(&server_config)?;

    let message_framework = flash_messages_framework(&server_config.secret)?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let debounce = SearchDebounce::from_millis(server_config.search_debounce_ms);

    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Serving notes from {} on {}:{}",
        server_config.notes_api_url,
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", &server_config.assets_dir))
            .configure(routes::configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(debounce))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
