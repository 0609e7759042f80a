//! Registration and login handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::NewUser;
use quill_core::error::RepoError;
use quill_core::ports::{AuthError, PasswordService, TokenService};
use quill_shared::MessageResponse;
use quill_shared::dto::{LoginRequest, LoginResponse, RegisterRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    // Check if the username is already taken
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Validation("Username already exists".to_string()));
    }

    // Hash password
    let password_hash = password_service.hash(&req.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::Internal("Internal server error".to_string())
    })?;

    // Create user; a concurrent registration of the same username loses the
    // race at the unique constraint and gets the same clean 400.
    let user = match state
        .users
        .create(NewUser::new(req.username, password_hash))
        .await
    {
        Ok(user) => user,
        Err(RepoError::Constraint(_)) => {
            return Err(AppError::Validation("Username already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(username = %user.username, "New user registered");

    Ok(HttpResponse::Created().json(MessageResponse::new(
        "User registered successfully, please log in",
    )))
}

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    // Find user by username, then verify the password against its digest
    let user = match state.users.find_by_username(&req.username).await? {
        Some(user) if password_service.verify(&req.password, &user.password_hash) => user,
        _ => {
            tracing::info!(username = %req.username, "Failed login attempt");
            return Err(AppError::Auth(AuthError::InvalidCredentials));
        }
    };

    // Issue the bearer token
    let token = token_service.issue(user.id).map_err(|e| {
        tracing::error!(error = %e, "Token issuance failed");
        AppError::Internal("Internal server error".to_string())
    })?;

    tracing::info!(username = %user.username, "User logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        username: user.username,
    }))
}
