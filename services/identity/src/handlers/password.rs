use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::password_reset::{
    CompleteResetInput, CompleteResetUseCase, RequestResetUseCase, ResendResetOtpUseCase,
    VerifyResetOtpUseCase,
};

#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

// ── POST /auth/password/forgot ───────────────────────────────────────────────

pub async fn request_reset(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = RequestResetUseCase {
        users: state.user_repo(),
        otp: state.otp_service(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /auth/password/verify ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyResetRequest {
    pub email: String,
    pub code: String,
}

/// Confirms the code without consuming it; the client re-presents the same
/// (email, code) pair at `POST /auth/password/reset`.
pub async fn verify_reset_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyResetRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = VerifyResetOtpUseCase {
        otp: state.otp_service(),
    };
    usecase.execute(&body.email, &body.code).await?;
    Ok(StatusCode::OK)
}

// ── POST /auth/password/reset ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CompleteResetRequest {
    pub email: String,
    pub code: String,
    pub password: String,
    pub password_confirmation: String,
}

pub async fn complete_reset(
    State(state): State<AppState>,
    Json(body): Json<CompleteResetRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = CompleteResetUseCase {
        users: state.user_repo(),
        otp: state.otp_service(),
    };
    usecase
        .execute(CompleteResetInput {
            email: body.email,
            code: body.code,
            password: body.password,
            password_confirmation: body.password_confirmation,
        })
        .await?;
    Ok(StatusCode::OK)
}

// ── POST /auth/password/resend ───────────────────────────────────────────────

pub async fn resend_reset_otp(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = ResendResetOtpUseCase {
        users: state.user_repo(),
        otp: state.otp_service(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}
