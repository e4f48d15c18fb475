use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor, SqlitePool};
use validator::Validate;

/// Represents the 'news' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Publication day. Defaults to the day the row was created.
    pub date: NaiveDate,
}

/// Homepage row: a news item together with its number of comments.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsListItem {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
    pub comments_count: i64,
}

/// A news item to insert; `date` falls back to today.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewNews {
    #[validate(length(min = 1, max = 50, message = "Title must be 1-50 characters"))]
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl News {
    /// The freshest news, newest first, at most `limit` items.
    pub async fn latest(pool: &SqlitePool, limit: i64) -> Result<Vec<NewsListItem>, sqlx::Error> {
        sqlx::query_as::<_, NewsListItem>(
            r#"
            SELECT
                n.id, n.title, n.text, n.date,
                (SELECT COUNT(*) FROM comments c WHERE c.news_id = n.id) AS comments_count
            FROM news n
            ORDER BY n.date DESC, n.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<News>, sqlx::Error> {
        sqlx::query_as::<_, News>("SELECT id, title, text, date FROM news WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create<'e, E>(db: E, new: &NewNews) -> Result<News, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let date = new.date.unwrap_or_else(|| Utc::now().date_naive());

        sqlx::query_as::<_, News>(
            r#"
            INSERT INTO news (title, text, date)
            VALUES (?, ?, ?)
            RETURNING id, title, text, date
            "#,
        )
        .bind(&new.title)
        .bind(&new.text)
        .bind(date)
        .fetch_one(db)
        .await
    }

    pub async fn count<'e, E>(db: E) -> Result<i64, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(db)
            .await
    }
}
