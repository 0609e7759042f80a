//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use std::sync::Arc;

use quill_core::domain::User;
use quill_core::ports::{AuthError, TokenService};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.username)
/// }
/// ```
///
/// Resolves the bearer token to a full user record, so a token whose user no
/// longer exists is rejected the same way a bad token is.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Get token service and state from app data
            let token_service = req
                .app_data::<web::Data<Arc<dyn TokenService>>>()
                .ok_or_else(|| {
                    tracing::error!("TokenService not found in app data");
                    AppError::Internal("Internal server error".to_string())
                })?;
            let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AppError::Internal("Internal server error".to_string())
            })?;

            // Extract Bearer token from Authorization header
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .ok_or(AppError::Auth(AuthError::MissingToken))?;

            let auth_str = auth_header.to_str().map_err(|_| {
                AppError::Auth(AuthError::InvalidToken(
                    "invalid authorization header".to_string(),
                ))
            })?;

            // Parse "Bearer <token>"
            let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
                AppError::Auth(AuthError::InvalidToken("expected Bearer token".to_string()))
            })?;

            // Validate the token, then resolve the embedded user id
            let user_id = token_service.verify(token).map_err(AppError::Auth)?;

            let user = state
                .users
                .find_by_id(user_id)
                .await?
                .ok_or(AppError::Auth(AuthError::UnknownUser))?;

            Ok(Identity { user })
        })
    }
}
