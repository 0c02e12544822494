use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    error::{ApiError, ValidationError},
    posts::repo::Post,
    state::AppState,
};

use super::{
    dto::{CommentDeletedResponse, CommentListResponse, CommentRequest, CommentResponse},
    repo::Comment,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/comments/:id", get(list_comments))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/:id", post(create_comment))
        .route("/comments/:id", put(update_comment))
        .route("/comments/:id", delete(delete_comment))
}

fn validate_content(req: &CommentRequest) -> Result<&str, ValidationError> {
    match req.content.as_deref() {
        Some(c) if !c.is_empty() => Ok(c),
        _ => Err(ValidationError::new("content", "Content is required")),
    }
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i32>,
) -> Result<Json<CommentListResponse>, ApiError> {
    let comments = Comment::list_by_post(&state.db, post_id).await?;
    Ok(Json(CommentListResponse {
        status: 200,
        data: comments.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i32>,
    Json(payload): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let content = validate_content(&payload)?;

    if Post::find_by_id(&state.db, post_id).await?.is_none() {
        return Err(ApiError::NotFound("Post not found".into()));
    }

    let created = Comment::create(&state.db, content, post_id, claims.id).await?;
    info!(comment_id = %created.id, post_id = %post_id, author_id = %claims.id, "comment created");
    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            status: 201,
            message: "Comment created successfully".into(),
            data: created.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<CommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let content = validate_content(&payload)?;

    let comment = Comment::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".into()))?;
    comment.ensure_owned_by(claims.id, "update")?;

    let updated = Comment::update(&state.db, id, content).await?;
    info!(comment_id = %id, user_id = %claims.id, "comment updated");
    Ok(Json(CommentResponse {
        status: 200,
        message: "Comment updated successfully".into(),
        data: updated.into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<CommentDeletedResponse>, ApiError> {
    let comment = Comment::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".into()))?;
    comment.ensure_owned_by(claims.id, "delete")?;

    Comment::delete(&state.db, id).await?;
    info!(comment_id = %id, user_id = %claims.id, "comment deleted");
    Ok(Json(CommentDeletedResponse {
        status: 200,
        message: "Comment deleted successfully".into(),
    }))
}
