use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::db;
use crate::models::User;
use crate::password;

/// Errors surfaced by the admin creation operation
#[derive(Debug, Error)]
pub enum CreateAdminError {
    #[error("User with username '{0}' already exists.")]
    UsernameTaken(String),
    #[error("User with email '{0}' already exists.")]
    EmailTaken(String),
    #[error("Failed to hash password: {0}")]
    Hash(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create an admin user
///
/// Runs inside a single transaction: look up the username, look up the email,
/// hash the password, insert the row, commit. Any failure before the commit
/// rolls the transaction back (sqlx rolls back on drop), so the database is
/// left untouched on every error path.
pub async fn create_admin(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, CreateAdminError> {
    let mut tx = pool.begin().await?;

    if db::get_user_by_username(&mut *tx, username).await?.is_some() {
        return Err(CreateAdminError::UsernameTaken(username.to_string()));
    }

    if db::get_user_by_email(&mut *tx, email).await?.is_some() {
        return Err(CreateAdminError::EmailTaken(email.to_string()));
    }

    let hashed_password =
        password::hash_password(password).map_err(|e| CreateAdminError::Hash(e.to_string()))?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: email.to_string(),
        hashed_password,
        is_active: true,
        is_admin: true,
        profile_image_base64: None,
        created_at: Utc::now(),
        last_login: None,
        login_streak: 0,
        is_verified: false,
        verification_token: None,
        is_subscribed: false,
    };

    let inserted = db::insert_user(&mut *tx, &user)
        .await
        .map_err(|e| map_insert_error(e, username, email))?;

    tx.commit().await?;

    Ok(inserted)
}

/// Map a unique-constraint violation on insert back to the duplicate errors
///
/// The pre-checks leave a window where a concurrent insert can slip in between
/// check and insert; the unique constraints on `users` close it. A violated
/// constraint is reported with the same message as the pre-check.
pub(crate) fn map_insert_error(err: sqlx::Error, username: &str, email: &str) -> CreateAdminError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(c) if c.contains("username") => {
                    return CreateAdminError::UsernameTaken(username.to_string())
                }
                Some(c) if c.contains("email") => {
                    return CreateAdminError::EmailTaken(email.to_string())
                }
                _ => {}
            }
        }
    }

    CreateAdminError::Database(err)
}
