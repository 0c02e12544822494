use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    comments::{dto::CommentView, repo::Comment},
    error::ApiError,
    state::AppState,
};

use super::{
    dto::{
        CreatePostRequest, ListQuery, PostDetailResponse, PostDetails, PostListResponse,
        PostResponse,
    },
    repo::Post,
    validate::validate_post,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", put(update_post))
        .route("/posts/:id", delete(delete_post))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let (sort_field, sort_order) = query.sort();
    let posts = Post::list(&state.db, query.search.as_deref(), sort_field, sort_order).await?;

    // One round trip for every listed post's comments, grouped client-side.
    let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let mut by_post: HashMap<i32, Vec<CommentView>> = HashMap::new();
    for comment in Comment::list_by_posts(&state.db, &ids).await? {
        by_post.entry(comment.post_id).or_default().push(comment.into());
    }

    let data = posts
        .into_iter()
        .map(|p| {
            let comments = by_post.remove(&p.id).unwrap_or_default();
            PostDetails {
                post: p.into(),
                comments,
            }
        })
        .collect();

    Ok(Json(PostListResponse { status: 200, data }))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let post = Post::find_with_author(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;
    let comments = Comment::list_by_post(&state.db, id).await?;
    Ok(Json(PostDetailResponse {
        status: 200,
        data: PostDetails {
            post: post.into(),
            comments: comments.into_iter().map(Into::into).collect(),
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let input = validate_post(&payload)?;
    let created = Post::create(&state.db, &input.title, &input.content, claims.id).await?;
    info!(post_id = %created.id, author_id = %claims.id, "post created");
    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            status: 201,
            message: "Post created successfully".into(),
            data: created.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let input = validate_post(&payload)?;

    // Not-found before ownership: a 404 must not depend on who is asking.
    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;
    post.ensure_owned_by(claims.id, "update")?;

    let updated = Post::update(&state.db, id, &input.title, &input.content).await?;
    info!(post_id = %id, user_id = %claims.id, "post updated");
    Ok(Json(PostResponse {
        status: 200,
        message: "Post updated successfully".into(),
        data: updated.into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Post not found".into()))?;
    post.ensure_owned_by(claims.id, "delete")?;

    Post::delete(&state.db, id).await?;
    info!(post_id = %id, user_id = %claims.id, "post deleted");
    Ok(Json(PostResponse {
        status: 200,
        message: "Post deleted successfully".into(),
        data: post.into(),
    }))
}
