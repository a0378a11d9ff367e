//! HTTP handlers and route configuration.

mod auth;
mod chats;
mod comments;
mod health;
mod posts;
mod present;
mod users;

use actix_web::{error, web};

use crate::middleware::error::AppError;

/// Body and path extraction failures answer with a failure envelope too.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected JSON body: {}", err);
        let message = match err {
            error::JsonPayloadError::ContentType => "Expected a JSON body",
            _ => "Malformed JSON body",
        };
        AppError::BadRequest(message.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected path: {}", err);
        AppError::BadRequest("Invalid path parameter".to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        tracing::debug!("Rejected query: {}", err);
        AppError::BadRequest("Invalid query string".to_string()).into()
    }));
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);

    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .route("/auth/login", web::post().to(auth::login))
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::create))
                    .route("/exists/{field}/{value}", web::get().to(users::exists))
                    .route("/{id}", web::get().to(users::find_one))
                    .route("/{id}", web::put().to(users::update))
                    .route("/{id}/profile", web::put().to(users::update_profile))
                    .route("/{id}/password", web::put().to(users::update_password))
                    .route("/{id}/posts", web::get().to(users::find_posts))
                    .route("/{id}/chats", web::get().to(chats::find_chats))
                    .route("/{id}/chats/{other}", web::get().to(chats::find_messages))
                    .route("/{id}/chats/{other}", web::post().to(chats::send_message))
                    .route(
                        "/{id}/notifications",
                        web::get().to(users::find_notifications),
                    )
                    .route(
                        "/{id}/notifications",
                        web::delete().to(users::clear_notifications),
                    ),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::find_all))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::find_one))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/comments")
                    .route("", web::post().to(comments::create))
                    .route("/{id}", web::get().to(comments::find_one))
                    .route("/{id}", web::put().to(comments::update))
                    .route("/{id}", web::delete().to(comments::delete)),
            ),
    );
}
