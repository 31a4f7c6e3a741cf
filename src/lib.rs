#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api::http::HttpCustomerApi;
#[cfg(feature = "server")]
use crate::controller::FormController;
#[cfg(feature = "server")]
use crate::models::config::ClientConfig;
#[cfg(feature = "server")]
use crate::routes::CustomerPages;
#[cfg(feature = "server")]
use crate::routes::main::{
    cancel_edit, delete_customer, edit_customer, export_customers, next_page, previous_page,
    save_customer, show_index, submit_query, submit_registration,
};

pub mod api;
pub mod controller;
pub mod domain;
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
pub mod view;

/// Builds and runs the Actix-Web host using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(client_config: ClientConfig) -> std::io::Result<()> {
    // Keys and stores for sessions and flash messages.
    let secret_key = Key::try_from(client_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;
    let message_framework = flash_messages(secret_key.clone());

    let tera = Tera::new(&client_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    log::info!("Using customer backend at {}", client_config.api_url);
    let api = HttpCustomerApi::new(client_config.api_url.clone());
    let pages = web::Data::new(CustomerPages::new(FormController::new(api)));

    let bind_address = (client_config.address.clone(), client_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(sessions(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure_routes)
            .app_data(web::Data::new(tera.clone()))
            .app_data(pages.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}

/// Cookie session carrying each visitor's page id.
#[cfg(feature = "server")]
pub fn sessions(secret_key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), secret_key)
        .cookie_secure(false) // set to true in prod
        .build()
}

/// Flash messages stored in a signed cookie.
#[cfg(feature = "server")]
pub fn flash_messages(secret_key: Key) -> FlashMessagesFramework {
    let message_store = CookieMessageStore::builder(secret_key).build();
    FlashMessagesFramework::builder(message_store).build()
}

/// Registers every page route on `cfg`.
#[cfg(feature = "server")]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(show_index)
        .service(submit_registration)
        .service(submit_query)
        .service(previous_page)
        .service(next_page)
        .service(edit_customer)
        .service(save_customer)
        .service(cancel_edit)
        .service(delete_customer)
        .service(export_customers);
}
