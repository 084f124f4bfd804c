use chrono::Utc;
use uuid::Uuid;

use crate::domain::password::hash_password;
use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::domain::types::{
    MIN_PASSWORD_LEN, OtpPurpose, User, UserRole, validate_code_shape, validate_email,
};
use crate::error::IdentityServiceError;
use crate::usecase::otp::OtpService;
use crate::usecase::session::issue_session_token;

fn validate_new_password(
    password: &str,
    confirmation: &str,
) -> Result<(), IdentityServiceError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(IdentityServiceError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirmation {
        return Err(IdentityServiceError::Validation(
            "password confirmation does not match".to_owned(),
        ));
    }
    Ok(())
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}

/// What the registration request did; both outcomes route the caller into
/// the pending-verification step.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// New unverified account created, code issued.
    Created,
    /// Email already held an unverified account — no duplicate; treated as a
    /// resend.
    CodeResent,
}

pub struct RegisterUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otp: OtpService<R, M>,
}

impl<U, R, M> RegisterUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub async fn execute(
        &self,
        input: RegisterInput,
    ) -> Result<RegisterOutcome, IdentityServiceError> {
        if input.name.trim().is_empty() || input.name.len() > 255 {
            return Err(IdentityServiceError::Validation(
                "name must be between 1 and 255 characters".to_owned(),
            ));
        }
        if !validate_email(&input.email) {
            return Err(IdentityServiceError::Validation(
                "invalid email address".to_owned(),
            ));
        }
        validate_new_password(&input.password, &input.password_confirmation)?;

        if let Some(existing) = self.users.find_by_email(&input.email).await? {
            if existing.is_verified {
                return Err(IdentityServiceError::EmailTaken);
            }
            // Pending account: re-enter the same state with a fresh code.
            self.otp
                .issue(&input.email, OtpPurpose::Registration)
                .await?;
            return Ok(RegisterOutcome::CodeResent);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email.clone(),
            name: input.name,
            phone: input.phone,
            password_hash: hash_password(&input.password)?,
            role: UserRole::Customer,
            is_verified: false,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        self.otp
            .issue(&input.email, OtpPurpose::Registration)
            .await?;
        Ok(RegisterOutcome::Created)
    }
}

// ── VerifyRegistration ───────────────────────────────────────────────────────

pub struct VerifyRegistrationInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyRegistrationOutput {
    pub user: User,
    pub session_token: String,
}

pub struct VerifyRegistrationUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otp: OtpService<R, M>,
    pub jwt_secret: String,
}

impl<U, R, M> VerifyRegistrationUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub async fn execute(
        &self,
        input: VerifyRegistrationInput,
    ) -> Result<VerifyRegistrationOutput, IdentityServiceError> {
        if !validate_code_shape(&input.code) {
            return Err(IdentityServiceError::Validation(
                "code must be six digits".to_owned(),
            ));
        }
        let mut user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;

        let consumed = self
            .otp
            .consume(&input.email, &input.code, OtpPurpose::Registration)
            .await?;
        if !consumed {
            return Err(IdentityServiceError::InvalidOtp);
        }

        let now = Utc::now();
        self.users.mark_verified(user.id, now).await?;
        user.is_verified = true;
        user.email_verified_at = Some(now);

        // Verification doubles as login for the fresh account.
        let session_token = issue_session_token(&user, &self.jwt_secret)?;
        Ok(VerifyRegistrationOutput {
            user,
            session_token,
        })
    }
}

// ── ResendRegistrationOtp ────────────────────────────────────────────────────

pub struct ResendRegistrationOtpUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otp: OtpService<R, M>,
}

impl<U, R, M> ResendRegistrationOtpUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, email: &str) -> Result<(), IdentityServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;
        if user.is_verified {
            return Err(IdentityServiceError::AlreadyVerified);
        }
        self.otp.issue(email, OtpPurpose::Registration).await?;
        Ok(())
    }
}
