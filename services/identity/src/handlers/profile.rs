use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use mercato_auth_types::identity::IdentityHeaders;

use crate::error::IdentityServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, IdentityServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /auth/me ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                name: body.name,
                phone: body.phone,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
