use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::IdentityServiceError;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, IdentityServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<(), IdentityServiceError> {
        if input.name.is_none() && input.phone.is_none() {
            return Err(IdentityServiceError::Validation(
                "nothing to update".to_owned(),
            ));
        }
        if let Some(ref name) = input.name {
            if name.trim().len() < 2 || name.len() > 50 {
                return Err(IdentityServiceError::Validation(
                    "name must be between 2 and 50 characters".to_owned(),
                ));
            }
        }
        if let Some(ref phone) = input.phone {
            let valid = phone.len() >= 10
                && phone
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
            if !valid {
                return Err(IdentityServiceError::Validation(
                    "invalid phone number".to_owned(),
                ));
            }
        }
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;
        self.users
            .update_profile(user_id, input.name.as_deref(), input.phone.as_deref())
            .await
    }
}
