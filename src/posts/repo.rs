use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::warn;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Post row joined with its author's public fields, for list/detail views.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author_name: String,
    pub author_email: String,
}

/// Sort column for the list endpoint. Whitelisted here so the query string
/// never reaches the ORDER BY clause directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "p.created_at",
            SortField::UpdatedAt => "p.updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Post {
    /// Ownership check: only the creating author may mutate a post. `action`
    /// is the attempted verb, used in the refusal message.
    pub fn ensure_owned_by(&self, user_id: i32, action: &str) -> Result<(), ApiError> {
        if self.author_id != user_id {
            warn!(post_id = %self.id, author_id = %self.author_id, user_id = %user_id, "post mutation forbidden");
            return Err(ApiError::Forbidden(format!(
                "Forbidden: You can only {action} your own posts"
            )));
        }
        Ok(())
    }

    pub async fn list(
        db: &PgPool,
        search: Option<&str>,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> sqlx::Result<Vec<PostWithAuthor>> {
        let sql = format!(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE $1::text IS NULL
               OR p.title ILIKE '%' || $1 || '%'
               OR p.content ILIKE '%' || $1 || '%'
               OR u.name ILIKE '%' || $1 || '%'
            ORDER BY {} {}
            "#,
            sort_field.column(),
            sort_order.keyword(),
        );
        sqlx::query_as::<_, PostWithAuthor>(&sql)
            .bind(search)
            .fetch_all(db)
            .await
    }

    pub async fn find_with_author(db: &PgPool, id: i32) -> sqlx::Result<Option<PostWithAuthor>> {
        sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.title, p.content, p.author_id, p.created_at, p.updated_at,
                   u.name AS author_name, u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i32) -> sqlx::Result<Option<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        title: &str,
        content: &str,
        author_id: i32,
    ) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(db)
        .await
    }

    /// Updates title/content only; author_id is immutable after creation.
    pub async fn update(db: &PgPool, id: i32, title: &str, content: &str) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2, content = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn post_by(author_id: i32) -> Post {
        let now = OffsetDateTime::now_utc();
        Post {
            id: 1,
            title: "first title".into(),
            content: "first content".into(),
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_may_mutate() {
        assert!(post_by(7).ensure_owned_by(7, "update").is_ok());
        assert!(post_by(7).ensure_owned_by(7, "delete").is_ok());
    }

    #[test]
    fn non_owner_always_gets_403() {
        let err = post_by(7).ensure_owned_by(8, "update").unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            err.to_string(),
            "Forbidden: You can only update your own posts"
        );

        let err = post_by(7).ensure_owned_by(8, "delete").unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            err.to_string(),
            "Forbidden: You can only delete your own posts"
        );
    }
}
