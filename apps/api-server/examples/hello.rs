//! Routing demo - a single root route.

use actix_web::{App, HttpServer, web};

async fn home() -> &'static str {
    "Hello, this is the home page!"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    HttpServer::new(|| App::new().route("/", web::get().to(home)))
        .bind(("127.0.0.1", 8080))?
        .run()
        .await
}
