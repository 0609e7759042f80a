//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, web};

use quill_shared::MessageResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            // Posts
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts", web::get().to(posts::list_posts))
            .route("/posts/{id}", web::get().to(posts::get_post))
            .route("/posts/{id}", web::put().to(posts::update_post))
            .route("/posts/{id}", web::delete().to(posts::delete_post)),
    );
}

/// Uniform JSON body for routes that match nothing.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::new("Endpoint not found"))
}
