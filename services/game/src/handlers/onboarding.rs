use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use qbm_auth_types::identity::Identity;
use qbm_domain::locale::Locale;
use qbm_domain::role::UserRole;

use crate::error::GameServiceError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::onboarding::{OnboardInput, OnboardUserUseCase};

#[derive(Deserialize)]
pub struct OnboardRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Option<UserRole>,
    pub locale: Option<Locale>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize)]
pub struct OnboardResponse {
    pub user: UserResponse,
    pub created: bool,
    pub seeded: bool,
}

// ── POST /onboarding ─────────────────────────────────────────────────────────

pub async fn onboard(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<OnboardRequest>,
) -> Result<(StatusCode, Json<OnboardResponse>), GameServiceError> {
    let usecase = OnboardUserUseCase {
        users: state.user_repo(),
        stages: state.stage_repo(),
        sections: state.section_repo(),
        games: state.game_repo(),
        progress: state.progress_repo(),
    };
    let output = usecase
        .execute(
            &identity.subject,
            identity.locale,
            OnboardInput {
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                role: body.role,
                locale: body.locale,
                country: body.country,
                phone: body.phone,
            },
        )
        .await?;

    let status = if output.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(OnboardResponse {
            user: output.user.into(),
            created: output.created,
            seeded: output.seeded,
        }),
    ))
}
