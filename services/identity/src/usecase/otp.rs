use chrono::{Duration, Utc};
use rand::RngExt;
use tracing::warn;
use uuid::Uuid;

use crate::domain::repository::{Mailer, OtpRepository};
use crate::domain::types::{OtpCode, OtpPurpose};
use crate::error::IdentityServiceError;

/// Draw a uniform six-digit code, zero-padded. One in a million guesses per
/// attempt; the attempt limit, not generator strength, is what throttles
/// brute force.
fn generate_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..=999_999u32))
}

/// OTP generator/verifier, constructed with its store and notification sink.
///
/// No process-wide state: every flow controller builds one from the shared
/// `AppState`, and tests substitute in-memory ports.
pub struct OtpService<R, M>
where
    R: OtpRepository,
    M: Mailer,
{
    pub otp_codes: R,
    pub mailer: M,
    /// Validity window for issued codes; also feeds the email copy.
    pub ttl: Duration,
    /// Minimum interval between issuances per (email, purpose).
    pub resend_cooldown: Duration,
}

impl<R, M> OtpService<R, M>
where
    R: OtpRepository,
    M: Mailer,
{
    /// Issue a fresh code for (email, purpose): enforce the resend cooldown,
    /// delete superseded unconsumed codes, persist, dispatch the email.
    ///
    /// Delete-then-insert is best-effort, not transactional — two racing
    /// issuances can leave two live codes, and either verifies.
    ///
    /// Returns the code; production callers ignore it (delivery is
    /// out-of-band), tests don't.
    pub async fn issue(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<String, IdentityServiceError> {
        let now = Utc::now();

        // Cooldown counts from the newest record for the pair, even one
        // already consumed or superseded.
        if let Some(last) = self.otp_codes.latest_issued_at(email, purpose).await? {
            if now - last < self.resend_cooldown {
                return Err(IdentityServiceError::ResendCooldown);
            }
        }

        self.delete_old(email, purpose).await?;

        let code = generate_code();
        let record = OtpCode {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            code: code.clone(),
            purpose,
            attempts: 0,
            consumed_at: None,
            expires_at: now + self.ttl,
            created_at: now,
        };
        self.otp_codes.insert(&record).await?;

        // The record is already persisted and enterable; a sink failure is
        // logged, never propagated. Resend is the recovery path.
        if let Err(e) = self.mailer.send_otp(email, &code, purpose).await {
            warn!(error = %e, email, purpose = purpose.as_str(), "otp email dispatch failed");
        }

        Ok(code)
    }

    /// Non-consuming check: does a live record match (email, code, purpose)?
    ///
    /// A miss bumps the failed-attempt counter on the pair's live records.
    pub async fn check(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<bool, IdentityServiceError> {
        match self.otp_codes.find_live(email, code, purpose).await? {
            Some(_) => Ok(true),
            None => {
                self.otp_codes.record_failed_attempt(email, purpose).await?;
                Ok(false)
            }
        }
    }

    /// One-shot consumption: find the live matching record and atomically
    /// mark it consumed.
    ///
    /// Wrong code, expired, already consumed, attempt limit reached, never
    /// issued, and losing a consume race are all the same `false` — callers
    /// surface one uniform failure.
    pub async fn consume(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<bool, IdentityServiceError> {
        let Some(record) = self.otp_codes.find_live(email, code, purpose).await? else {
            self.otp_codes.record_failed_attempt(email, purpose).await?;
            return Ok(false);
        };
        // Conditional write: false here means a concurrent consumer won.
        self.otp_codes.consume(record.id).await
    }

    /// Delete all unconsumed codes for (email, purpose), any expiry.
    pub async fn delete_old(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<u64, IdentityServiceError> {
        self.otp_codes.delete_unconsumed(email, purpose).await
    }

    /// Purge every expired record. Hygiene only — matching already filters
    /// on expiry. Returns the purged count for logging.
    pub async fn sweep_expired(&self) -> Result<u64, IdentityServiceError> {
        self.otp_codes.delete_expired(Utc::now()).await
    }
}
