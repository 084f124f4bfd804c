use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use mercato_auth_types::cookie::set_session_cookie;

use crate::error::IdentityServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::register::{
    RegisterInput, RegisterOutcome, RegisterUseCase, ResendRegistrationOtpUseCase,
    VerifyRegistrationInput, VerifyRegistrationUseCase,
};

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        otp: state.otp_service(),
    };
    let outcome = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
            password: body.password,
            password_confirmation: body.password_confirmation,
        })
        .await?;
    Ok(match outcome {
        RegisterOutcome::Created => StatusCode::CREATED,
        RegisterOutcome::CodeResent => StatusCode::OK,
    })
}

// ── POST /auth/register/verify ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRegistrationRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify_registration(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyRegistrationRequest>,
) -> Result<(CookieJar, Json<UserResponse>), IdentityServiceError> {
    let usecase = VerifyRegistrationUseCase {
        users: state.user_repo(),
        otp: state.otp_service(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(VerifyRegistrationInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    let jar = set_session_cookie(jar, output.session_token, state.cookie_domain.clone());
    Ok((jar, Json(output.user.into())))
}

// ── POST /auth/register/resend ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResendRequest {
    pub email: String,
}

pub async fn resend_registration_otp(
    State(state): State<AppState>,
    Json(body): Json<ResendRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = ResendRegistrationOtpUseCase {
        users: state.user_repo(),
        otp: state.otp_service(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}
