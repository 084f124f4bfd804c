use crate::domain::password::hash_password;
use crate::domain::repository::{Mailer, OtpRepository, UserRepository};
use crate::domain::types::{MIN_PASSWORD_LEN, OtpPurpose, validate_code_shape};
use crate::error::IdentityServiceError;
use crate::usecase::otp::OtpService;

// ── RequestReset ─────────────────────────────────────────────────────────────

/// Entry to the reset flow. Reset is gated on prior email-ownership proof:
/// an unverified account is rejected here.
pub struct RequestResetUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otp: OtpService<R, M>,
}

impl<U, R, M> RequestResetUseCase<U, R, M>
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
        if !user.is_verified {
            return Err(IdentityServiceError::UserNotVerified);
        }
        self.otp.issue(email, OtpPurpose::PasswordReset).await?;
        Ok(())
    }
}

// ── VerifyResetOtp ───────────────────────────────────────────────────────────

/// Intermediate step: confirms the code without consuming it, so the same
/// (email, code) pair can be re-presented at completion. Consumption happens
/// exactly once, at `CompleteResetUseCase`.
pub struct VerifyResetOtpUseCase<R, M>
where
    R: OtpRepository,
    M: Mailer,
{
    pub otp: OtpService<R, M>,
}

impl<R, M> VerifyResetOtpUseCase<R, M>
where
    R: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, email: &str, code: &str) -> Result<(), IdentityServiceError> {
        if !validate_code_shape(code) {
            return Err(IdentityServiceError::Validation(
                "code must be six digits".to_owned(),
            ));
        }
        if !self.otp.check(email, code, OtpPurpose::PasswordReset).await? {
            return Err(IdentityServiceError::InvalidOtp);
        }
        Ok(())
    }
}

// ── CompleteReset ────────────────────────────────────────────────────────────

pub struct CompleteResetInput {
    pub email: String,
    pub code: String,
    pub password: String,
    pub password_confirmation: String,
}

pub struct CompleteResetUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otp: OtpService<R, M>,
}

impl<U, R, M> CompleteResetUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    /// Rotate the credential. The session is not auto-authenticated — the
    /// user logs in afresh with the new password.
    pub async fn execute(&self, input: CompleteResetInput) -> Result<(), IdentityServiceError> {
        if !validate_code_shape(&input.code) {
            return Err(IdentityServiceError::Validation(
                "code must be six digits".to_owned(),
            ));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(IdentityServiceError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if input.password != input.password_confirmation {
            return Err(IdentityServiceError::Validation(
                "password confirmation does not match".to_owned(),
            ));
        }

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;

        let consumed = self
            .otp
            .consume(&input.email, &input.code, OtpPurpose::PasswordReset)
            .await?;
        if !consumed {
            return Err(IdentityServiceError::InvalidOtp);
        }

        let hash = hash_password(&input.password)?;
        self.users.update_password_hash(user.id, &hash).await?;
        Ok(())
    }
}

// ── ResendResetOtp ───────────────────────────────────────────────────────────

pub struct ResendResetOtpUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub users: U,
    pub otp: OtpService<R, M>,
}

impl<U, R, M> ResendResetOtpUseCase<U, R, M>
where
    U: UserRepository,
    R: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, email: &str) -> Result<(), IdentityServiceError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;
        self.otp.issue(email, OtpPurpose::PasswordReset).await?;
        Ok(())
    }
}
