use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Identity service domain error variants.
///
/// "Wrong code" and "expired code" are deliberately collapsed into
/// `InvalidOtp` — the distinction is never surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum IdentityServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("user not found")]
    UserNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("email already verified")]
    AlreadyVerified,
    #[error("account not verified")]
    UserNotVerified,
    #[error("invalid or expired code")]
    InvalidOtp,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("a code was sent recently, wait before requesting another")]
    ResendCooldown,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::UserNotVerified => "USER_NOT_VERIFIED",
            Self::InvalidOtp => "INVALID_OTP",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ResendCooldown => "RESEND_COOLDOWN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IdentityServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::AlreadyVerified | Self::UserNotVerified => {
                StatusCode::CONFLICT
            }
            Self::InvalidOtp | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::ResendCooldown => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
