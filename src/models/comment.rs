use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqliteExecutor};

/// Represents the 'comments' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// A comment joined with its author's username, as shown on the detail page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Comment {
    pub async fn find<'e, E>(db: E, id: i64) -> Result<Option<Comment>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Comment>(
            "SELECT id, news_id, author_id, text, created FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Comments of a news item, oldest first.
    pub async fn for_news<'e, E>(db: E, news_id: i64) -> Result<Vec<CommentView>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, CommentView>(
            r#"
            SELECT
                c.id, c.news_id, c.author_id, u.username AS author_username,
                c.text, c.created
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.news_id = ?
            ORDER BY c.created ASC, c.id ASC
            "#,
        )
        .bind(news_id)
        .fetch_all(db)
        .await
    }

    pub async fn create<'e, E>(
        db: E,
        news_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        Self::create_at(db, news_id, author_id, text, Utc::now()).await
    }

    /// Inserts a comment with an explicit creation time.
    pub async fn create_at<'e, E>(
        db: E,
        news_id: i64,
        author_id: i64,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (news_id, author_id, text, created)
            VALUES (?, ?, ?, ?)
            RETURNING id, news_id, author_id, text, created
            "#,
        )
        .bind(news_id)
        .bind(author_id)
        .bind(text)
        .bind(created)
        .fetch_one(db)
        .await
    }

    /// Only the text is editable; `created` is left alone.
    pub async fn update_text<'e, E>(db: E, id: i64, text: &str) -> Result<(), sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query("UPDATE comments SET text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(db: E, id: i64) -> Result<(), sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn count<'e, E>(db: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(db)
            .await
    }
}
