use serde::Serialize;
use sqlx::FromRow;

/// A registered account as stored in the `users` table.
///
/// Users are created on signup and never modified afterwards. The bcrypt hash
/// is never serialized into a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
}
