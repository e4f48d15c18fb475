// src/models/user.rs

use serde::Serialize;
use sqlx::{FromRow, SqliteExecutor};

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    /// A value that is not a PHC string marks an account that cannot log in.
    #[serde(skip)]
    pub password: String,
}

impl User {
    pub async fn find<'e, E>(db: E, id: i64) -> Result<Option<User>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_username<'e, E>(db: E, username: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(db)
            .await
    }

    /// Inserts a user. `password_hash` must already be hashed.
    pub async fn create<'e, E>(db: E, username: &str, password_hash: &str) -> Result<User, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }
}
