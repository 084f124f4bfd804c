use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use mercato_auth_types::cookie::{clear_session_cookie, set_session_cookie};

use crate::error::IdentityServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::session::{CreateSessionInput, CreateSessionUseCase};

// ── POST /auth/session (login) ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), IdentityServiceError> {
    let usecase = CreateSessionUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(CreateSessionInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    let jar = set_session_cookie(jar, output.session_token, state.cookie_domain.clone());
    Ok((jar, Json(output.user.into())))
}

// ── DELETE /auth/session (logout) ────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), IdentityServiceError> {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((jar, StatusCode::NO_CONTENT))
}
