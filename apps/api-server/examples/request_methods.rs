//! Routing demo - one handler behind several routes, plus method dispatch.

use actix_web::http::Method;
use actix_web::{App, HttpRequest, HttpServer, web};

// The same handler serves both "/" and "/index"
async fn index() -> &'static str {
    "Welcome to the main page!"
}

async fn login(req: HttpRequest) -> &'static str {
    if req.method() == Method::POST {
        "Processing login request..."
    } else {
        "Please submit the login form"
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    HttpServer::new(|| {
        App::new()
            .route("/", web::get().to(index))
            .route("/index", web::get().to(index))
            .route("/login", web::get().to(login))
            .route("/login", web::post().to(login))
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
