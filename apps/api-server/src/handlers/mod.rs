//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes. Request bodies above `body_limit`
/// bytes are refused with 413.
pub fn configure_routes(body_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::PayloadConfig::new(body_limit))
            .app_data(
                web::PathConfig::default().error_handler(|_err, _req| {
                    AppError::NotFound("Not found.".to_string()).into()
                }),
            )
            .route("/health", web::get().to(health::health_check))
            .service(
                web::resource("/posts/")
                    .route(web::get().to(posts::list_posts))
                    .route(web::post().to(posts::create_post)),
            )
            .service(
                web::resource("/posts/{id}/")
                    .route(web::get().to(posts::retrieve_post))
                    .route(web::put().to(posts::update_post))
                    .route(web::patch().to(posts::update_post))
                    .route(web::delete().to(posts::delete_post)),
            );
    }
}
