#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{OtpCode, OtpPurpose, User};
use crate::error::IdentityServiceError;

/// Repository for storefront accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError>;

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError>;

    /// Flip `is_verified` and stamp `email_verified_at`.
    async fn mark_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), IdentityServiceError>;

    /// Replace the stored credential hash.
    async fn update_password_hash(
        &self,
        id: Uuid,
        hash: &str,
    ) -> Result<(), IdentityServiceError>;

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), IdentityServiceError>;
}

/// Repository for one-time verification codes.
///
/// No uniqueness is enforced per (email, purpose) — concurrent issuance may
/// race, and either resulting code must verify.
pub trait OtpRepository: Send + Sync {
    async fn insert(&self, code: &OtpCode) -> Result<(), IdentityServiceError>;

    /// Find the live record matching (email, code, purpose): unconsumed,
    /// unexpired, under the attempt limit.
    async fn find_live(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, IdentityServiceError>;

    /// Consume a record by id, conditioned on it being unconsumed.
    /// Returns `true` iff this call performed the transition — of two racing
    /// consumers exactly one sees `true`.
    async fn consume(&self, id: Uuid) -> Result<bool, IdentityServiceError>;

    /// Bump the failed-attempt counter on the live records for the pair.
    async fn record_failed_attempt(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<(), IdentityServiceError>;

    /// Delete all unconsumed records for (email, purpose), irrespective of
    /// expiry. Invoked before issuing a replacement code.
    async fn delete_unconsumed(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<u64, IdentityServiceError>;

    /// Issuance time of the most recent record for the pair, consumed or not.
    /// Drives the server-side resend cooldown.
    async fn latest_issued_at(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<DateTime<Utc>>, IdentityServiceError>;

    /// Delete every record, any email or purpose, with `expires_at < now`.
    /// Returns the purged count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, IdentityServiceError>;
}

/// Fire-and-forget notification sink. Implementations must not block the
/// caller on delivery and must swallow (log) delivery failures — a code is
/// valid once persisted even if the email never arrives.
pub trait Mailer: Send + Sync {
    async fn send_otp(
        &self,
        to: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), IdentityServiceError>;
}
