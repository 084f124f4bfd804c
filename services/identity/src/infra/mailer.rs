use serde::Serialize;
use tracing::warn;

use crate::domain::repository::Mailer;
use crate::domain::types::OtpPurpose;
use crate::error::IdentityServiceError;

/// Mailer that hands messages to an HTTP mail relay.
///
/// Dispatch is spawned so callers never wait on the relay; failures are
/// logged and swallowed. The issued code stays valid either way — resend is
/// the recovery path for a lost email.
#[derive(Clone)]
pub struct RelayMailer {
    pub client: reqwest::Client,
    pub relay_url: String,
    pub from: String,
    /// Validity window rendered into the email copy. Kept in lockstep with
    /// the enforced TTL by construction from the same config value.
    pub ttl_minutes: i64,
}

#[derive(Serialize)]
struct OtpMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    code: &'a str,
    purpose: &'a str,
    valid_minutes: i64,
}

fn subject_for(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Registration => "Verify your email address",
        OtpPurpose::PasswordReset => "Reset your password",
    }
}

impl Mailer for RelayMailer {
    async fn send_otp(
        &self,
        to: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), IdentityServiceError> {
        let message = OtpMessage {
            from: &self.from,
            to,
            subject: subject_for(purpose),
            code,
            purpose: purpose.as_str(),
            valid_minutes: self.ttl_minutes,
        };
        let request = self
            .client
            .post(format!("{}/send", self.relay_url))
            .json(&message);
        let to = to.to_owned();
        tokio::spawn(async move {
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(to, status = %response.status(), "mail relay rejected message");
                }
                Err(e) => {
                    warn!(to, error = %e, "mail relay unreachable");
                }
                Ok(_) => {}
            }
        });
        Ok(())
    }
}
