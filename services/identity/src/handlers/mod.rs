pub mod password;
pub mod profile;
pub mod register;
pub mod session;

use serde::Serialize;

use crate::domain::types::User;

/// Account shape returned by verify/login/profile endpoints. Never carries
/// the credential hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: i16,
    pub is_verified: bool,
    #[serde(serialize_with = "mercato_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            phone: user.phone,
            role: user.role.as_wire(),
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}
