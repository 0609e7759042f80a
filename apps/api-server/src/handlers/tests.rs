//! Endpoint tests - the routes exercised end to end against the in-memory
//! stores, with the same route table and error translation as production.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use quill_core::ports::{PasswordService, TokenService};
use quill_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use crate::handlers;
use crate::middleware::error::{json_error_handler, path_error_handler};
use crate::state::AppState;

const TEST_SECRET: &str = "endpoint-test-secret";

fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration_hours: 1,
    }));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    App::new()
        .app_data(web::Data::new(AppState::in_memory()))
        .app_data(web::Data::new(token_service))
        .app_data(web::Data::new(password_service))
        .app_data(json_error_handler())
        .app_data(path_error_handler())
        .configure(handlers::configure_routes)
        .default_service(web::route().to(handlers::not_found))
}

fn register_req(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "username": username, "password": password }))
}

fn login_req(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": username, "password": password }))
}

#[actix_web::test]
async fn register_twice_rejects_duplicate_username() {
    let app = test::init_service(test_app()).await;

    let first = test::call_service(&app, register_req("alice", "s3cret").to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(&app, register_req("alice", "other").to_request()).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["message"], "Username already exists");
}

#[actix_web::test]
async fn register_with_missing_fields_is_rejected() {
    let app = test::init_service(test_app()).await;

    // Absent password field deserializes to empty and fails validation.
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "username": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Username and password are required");
}

#[actix_web::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = test::init_service(test_app()).await;
    test::call_service(&app, register_req("alice", "s3cret").to_request()).await;

    let resp = test::call_service(&app, login_req("alice", "wrong").to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid username or password");
}

#[actix_web::test]
async fn login_then_create_post_echoes_author() {
    let app = test::init_service(test_app()).await;
    test::call_service(&app, register_req("alice", "s3cret").to_request()).await;

    let login = test::call_service(&app, login_req("alice", "s3cret").to_request()).await;
    assert_eq!(login.status(), StatusCode::OK);
    let login_body: Value = test::read_body_json(login).await;
    assert_eq!(login_body["username"], "alice");
    let token = login_body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "Hello", "content": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["author"], "alice");
    assert_eq!(body["post"]["title"], "Hello");
}

#[actix_web::test]
async fn protected_route_without_token_is_unauthorized() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "Hello", "content": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing authentication token");
}

#[actix_web::test]
async fn expired_token_is_unauthorized() {
    let app = test::init_service(test_app()).await;
    test::call_service(&app, register_req("alice", "s3cret").to_request()).await;

    // Same secret, expiry already in the past.
    let expired_issuer = JwtTokenService::new(JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration_hours: -1,
    });
    let token = expired_issuer.issue(1).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "Hello", "content": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Token has expired");
}

#[actix_web::test]
async fn tampered_token_is_unauthorized() {
    let app = test::init_service(test_app()).await;
    test::call_service(&app, register_req("alice", "s3cret").to_request()).await;

    let login = test::call_service(&app, login_req("alice", "s3cret").to_request()).await;
    let login_body: Value = test::read_body_json(login).await;
    let token = format!("{}tamper", login_body["token"].as_str().unwrap());

    let req = test::TestRequest::delete()
        .uri("/api/posts/1")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid token");
}

#[actix_web::test]
async fn posts_are_listed_newest_first() {
    let app = test::init_service(test_app()).await;
    test::call_service(&app, register_req("alice", "s3cret").to_request()).await;
    let login = test::call_service(&app, login_req("alice", "s3cret").to_request()).await;
    let login_body: Value = test::read_body_json(login).await;
    let token = login_body["token"].as_str().unwrap().to_string();

    for title in ["first", "second", "third"] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "title": title, "content": "body" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[actix_web::test]
async fn fetching_unknown_post_is_not_found() {
    let app = test::init_service(test_app()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/posts/999").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Post not found");
    assert!(body.get("id").is_none());
}

#[actix_web::test]
async fn only_the_author_may_update_or_delete() {
    let app = test::init_service(test_app()).await;
    for name in ["alice", "bob"] {
        test::call_service(&app, register_req(name, "s3cret").to_request()).await;
    }

    let login = test::call_service(&app, login_req("alice", "s3cret").to_request()).await;
    let alice_token = test::read_body_json::<Value, _>(login).await["token"]
        .as_str()
        .unwrap()
        .to_string();
    let login = test::call_service(&app, login_req("bob", "s3cret").to_request()).await;
    let bob_token = test::read_body_json::<Value, _>(login).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    // Alice writes a post
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({ "title": "Mine", "content": "Original" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let post_id = test::read_body_json::<Value, _>(resp).await["post"]["id"]
        .as_i64()
        .unwrap();

    // Bob may not edit it
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .set_json(json!({ "title": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Bob may not delete it
    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The post is unchanged and still there
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Mine");
    assert_eq!(body["content"], "Original");
}

#[actix_web::test]
async fn partial_update_leaves_absent_fields_unchanged() {
    let app = test::init_service(test_app()).await;
    test::call_service(&app, register_req("alice", "s3cret").to_request()).await;
    let login = test::call_service(&app, login_req("alice", "s3cret").to_request()).await;
    let token = test::read_body_json::<Value, _>(login).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "Draft", "content": "Keep me" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let post_id = test::read_body_json::<Value, _>(resp).await["post"]["id"]
        .as_i64()
        .unwrap();

    // Title only; content must survive
    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "Final" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{post_id}"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Final");
    assert_eq!(body["content"], "Keep me");
}

#[actix_web::test]
async fn update_with_no_fields_is_rejected() {
    let app = test::init_service(test_app()).await;
    test::call_service(&app, register_req("alice", "s3cret").to_request()).await;
    let login = test::call_service(&app, login_req("alice", "s3cret").to_request()).await;
    let token = test::read_body_json::<Value, _>(login).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "Draft", "content": "Body" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let post_id = test::read_body_json::<Value, _>(resp).await["post"]["id"]
        .as_i64()
        .unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No update data provided");
}

#[actix_web::test]
async fn unmatched_route_gets_uniform_404_body() {
    let app = test::init_service(test_app()).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/nowhere").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Endpoint not found");
}
