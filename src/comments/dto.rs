use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo::{Comment, CommentWithAuthor};

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentAuthorView {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: i32,
    pub content: String,
    #[serde(rename = "postId")]
    pub post_id: i32,
    #[serde(rename = "authorId")]
    pub author_id: i32,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommentAuthorView>,
}

impl From<CommentWithAuthor> for CommentView {
    fn from(c: CommentWithAuthor) -> Self {
        Self {
            id: c.id,
            content: c.content,
            post_id: c.post_id,
            author_id: c.author_id,
            created_at: c.created_at,
            author: Some(CommentAuthorView {
                id: c.author_id,
                name: c.author_name,
            }),
        }
    }
}

impl From<Comment> for CommentView {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            content: c.content,
            post_id: c.post_id,
            author_id: c.author_id,
            created_at: c.created_at,
            author: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub status: u16,
    pub data: Vec<CommentView>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub status: u16,
    pub message: String,
    pub data: CommentView,
}

#[derive(Debug, Serialize)]
pub struct CommentDeletedResponse {
    pub status: u16,
    pub message: String,
}
