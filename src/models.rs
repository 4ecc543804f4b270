use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User model mirroring the web application's `users` table
///
/// The identifier is a generated UUID stored as text. Username and email are
/// each globally unique (enforced by unique constraints on the table).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub profile_image_base64: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub login_streak: i32,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub is_subscribed: bool,
}
