use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool};

use crate::models::User;

/// Create a database connection pool
///
/// A single connection is enough for a one-shot tool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Get user by username
pub async fn get_user_by_username(
    conn: &mut PgConnection,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(
    conn: &mut PgConnection,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Insert a new user row
///
/// Every column is bound explicitly: the application treats the defaults as
/// client-side, so the table itself carries no column defaults.
pub async fn insert_user(conn: &mut PgConnection, user: &User) -> Result<User, sqlx::Error> {
    let inserted = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (
            id, username, email, hashed_password, is_active, is_admin,
            profile_image_base64, created_at, last_login, login_streak,
            is_verified, verification_token, is_subscribed
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.is_active)
    .bind(user.is_admin)
    .bind(&user.profile_image_base64)
    .bind(user.created_at)
    .bind(user.last_login)
    .bind(user.login_streak)
    .bind(user.is_verified)
    .bind(&user.verification_token)
    .bind(user.is_subscribed)
    .fetch_one(conn)
    .await?;

    Ok(inserted)
}

// Include database integration tests
#[cfg(test)]
#[path = "db_tests.rs"]
mod db_tests;
