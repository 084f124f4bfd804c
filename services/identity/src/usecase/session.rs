use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use mercato_auth_types::token::{JwtClaims, SESSION_TOKEN_EXP};

use crate::domain::password::verify_password;
use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::IdentityServiceError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue the session JWT set as a cookie after login or registration
/// verification.
pub fn issue_session_token(user: &User, secret: &str) -> Result<String, IdentityServiceError> {
    let claims = JwtClaims {
        sub: user.id.to_string(),
        role: user.role.as_wire(),
        exp: now_secs() + SESSION_TOKEN_EXP,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| IdentityServiceError::Internal(e.into()))
}

// ── CreateSession (login) ────────────────────────────────────────────────────

pub struct CreateSessionInput {
    pub email: String,
    pub password: String,
}

pub struct CreateSessionOutput {
    pub user: User,
    pub session_token: String,
}

pub struct CreateSessionUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> CreateSessionUseCase<U> {
    /// Unknown email and wrong password fail identically — no account
    /// enumeration through the login form.
    pub async fn execute(
        &self,
        input: CreateSessionInput,
    ) -> Result<CreateSessionOutput, IdentityServiceError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(IdentityServiceError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(IdentityServiceError::InvalidCredentials);
        }
        if !user.is_verified {
            return Err(IdentityServiceError::UserNotVerified);
        }

        let session_token = issue_session_token(&user, &self.jwt_secret)?;
        Ok(CreateSessionOutput {
            user,
            session_token,
        })
    }
}
