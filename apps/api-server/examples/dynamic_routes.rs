//! Routing demo - dynamic path parameters.

use actix_web::{App, HttpServer, web};

// A username captured from the URL
async fn show_user_profile(username: web::Path<String>) -> String {
    format!("User page: {}", username.into_inner())
}

// A typed integer parameter
async fn show_post(post_id: web::Path<i64>) -> String {
    format!("Post id: {}", post_id.into_inner())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    HttpServer::new(|| {
        App::new()
            .route("/user/{username}", web::get().to(show_user_profile))
            .route("/post/{post_id}", web::get().to(show_post))
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
