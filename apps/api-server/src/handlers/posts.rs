//! Post CRUD handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewPost, PostUpdate};
use quill_shared::MessageResponse;
use quill_shared::dto::{CreatePostRequest, PostEnvelope, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.is_empty() || req.content.is_empty() {
        return Err(AppError::Validation(
            "Title and content are required".to_string(),
        ));
    }

    let post = state
        .posts
        .create(NewPost::new(identity.user.id, req.title, req.content))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error creating post");
            AppError::Internal("Unable to publish post".to_string())
        })?;

    tracing::info!(post_id = post.id, username = %identity.user.username, "Post created");

    Ok(HttpResponse::Created().json(PostEnvelope::new(
        "Post published successfully",
        PostResponse::new(post, Some(identity.user.username)),
    )))
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    // Ownership is decided on the user id, not the username
    if post.user_id != identity.user.id {
        return Err(AppError::Forbidden(
            "Not allowed to edit this post".to_string(),
        ));
    }

    let req = body.into_inner();
    let changes = PostUpdate {
        title: req.title,
        content: req.content,
    };
    if changes.is_empty() {
        return Err(AppError::Validation("No update data provided".to_string()));
    }

    let updated = state.posts.update(id, changes).await.map_err(|e| {
        tracing::error!(error = %e, post_id = id, "Error updating post");
        AppError::Internal("Failed to update post".to_string())
    })?;

    tracing::info!(post_id = id, username = %identity.user.username, "Post updated");

    Ok(HttpResponse::Ok().json(PostEnvelope::new(
        "Post updated successfully",
        PostResponse::new(updated, Some(identity.user.username)),
    )))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.user_id != identity.user.id {
        return Err(AppError::Forbidden(
            "Not allowed to delete this post".to_string(),
        ));
    }

    state.posts.delete(post.id).await.map_err(|e| {
        tracing::error!(error = %e, post_id = id, "Error deleting post");
        AppError::Internal("Failed to delete post".to_string())
    })?;

    tracing::info!(post_id = id, username = %identity.user.username, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted")))
}
