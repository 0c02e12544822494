use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::warn;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub author_id: i32,
    pub created_at: OffsetDateTime,
}

/// Comment row joined with its author's name, for read views.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub author_id: i32,
    pub created_at: OffsetDateTime,
    pub author_name: String,
}

impl Comment {
    /// Ownership check: only the creating author may mutate a comment.
    pub fn ensure_owned_by(&self, user_id: i32, action: &str) -> Result<(), ApiError> {
        if self.author_id != user_id {
            warn!(comment_id = %self.id, author_id = %self.author_id, user_id = %user_id, "comment mutation forbidden");
            return Err(ApiError::Forbidden(format!(
                "Forbidden: You can only {action} your own comments"
            )));
        }
        Ok(())
    }

    pub async fn list_by_post(db: &PgPool, post_id: i32) -> sqlx::Result<Vec<CommentWithAuthor>> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.post_id, c.author_id, c.created_at,
                   u.name AS author_name
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(db)
        .await
    }

    /// Comments for a set of posts in one round trip, for the list view.
    pub async fn list_by_posts(
        db: &PgPool,
        post_ids: &[i32],
    ) -> sqlx::Result<Vec<CommentWithAuthor>> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.post_id, c.author_id, c.created_at,
                   u.name AS author_name
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = ANY($1)
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_ids.to_vec())
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i32) -> sqlx::Result<Option<Comment>> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, post_id, author_id, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        content: &str,
        post_id: i32,
        author_id: i32,
    ) -> sqlx::Result<Comment> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, post_id, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, post_id, author_id, created_at
            "#,
        )
        .bind(content)
        .bind(post_id)
        .bind(author_id)
        .fetch_one(db)
        .await
    }

    pub async fn update(db: &PgPool, id: i32, content: &str) -> sqlx::Result<Comment> {
        sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2
            WHERE id = $1
            RETURNING id, content, post_id, author_id, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i32) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
