use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::comments::dto::CommentView;

use super::repo::{Post, PostWithAuthor, SortField, SortOrder};

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    #[serde(rename = "sortField")]
    pub sort_field: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

impl ListQuery {
    /// Unknown values fall back to the defaults rather than erroring.
    pub fn sort(&self) -> (SortField, SortOrder) {
        let field = match self.sort_field.as_deref() {
            Some("updatedAt") => SortField::UpdatedAt,
            _ => SortField::CreatedAt,
        };
        let order = match self.sort_order.as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        (field, order)
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[serde(rename = "authorId")]
    pub author_id: i32,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorView>,
}

impl From<PostWithAuthor> for PostView {
    fn from(p: PostWithAuthor) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            author_id: p.author_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            author: Some(AuthorView {
                id: p.author_id,
                name: p.author_name,
                email: p.author_email,
            }),
        }
    }
}

impl From<Post> for PostView {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            author_id: p.author_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            author: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub status: u16,
    pub data: Vec<PostDetails>,
}

#[derive(Debug, Serialize)]
pub struct PostDetails {
    #[serde(flatten)]
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub status: u16,
    pub data: PostDetails,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub status: u16,
    pub message: String,
    pub data: PostView,
}
