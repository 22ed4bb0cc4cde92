use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qbm_auth_types::identity::Identity;
use qbm_domain::locale::Locale;
use qbm_domain::role::UserRole;
use qbm_domain::status::ProgressStatus;

use crate::domain::types::Game;
use crate::error::GameServiceError;
use crate::handlers::require;
use crate::state::AppState;
use crate::usecase::game::{
    CreateGameInput, CreateGameUseCase, DeleteGameUseCase, GetGameUseCase, ListGamesUseCase,
    UpdateGameInput, UpdateGameUseCase,
};

#[derive(Serialize)]
pub struct GameResponse {
    pub id: String,
    pub stage_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub num_order: i32,
    pub locale: Locale,
    pub status: ProgressStatus,
    #[serde(serialize_with = "qbm_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "qbm_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            id: game.id.to_string(),
            stage_id: game.stage_id.to_string(),
            section_id: game.section_id.map(|id| id.to_string()),
            label: game.label,
            image: game.image,
            num_order: game.num_order,
            locale: game.locale,
            status: game.status,
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct GameBody {
    pub stage_id: Uuid,
    pub section_id: Option<Uuid>,
    pub label: String,
    pub image: Option<String>,
    pub num_order: i32,
    pub locale: Option<Locale>,
}

#[derive(Deserialize, Default)]
pub struct GameListQuery {
    pub locale: Option<Locale>,
    pub stage_id: Option<Uuid>,
}

// ── GET /games ───────────────────────────────────────────────────────────────

pub async fn list_games(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<GameListQuery>,
) -> Result<Json<Vec<GameResponse>>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = ListGamesUseCase {
        games: state.game_repo(),
    };
    let games = usecase.execute(query.locale, query.stage_id).await?;
    Ok(Json(games.into_iter().map(Into::into).collect()))
}

// ── GET /games/{id} ──────────────────────────────────────────────────────────

pub async fn get_game(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = GetGameUseCase {
        games: state.game_repo(),
    };
    let game = usecase.execute(id).await?;
    Ok(Json(game.into()))
}

// ── POST /games ──────────────────────────────────────────────────────────────

pub async fn create_game(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<GameBody>,
) -> Result<(StatusCode, Json<GameResponse>), GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = CreateGameUseCase {
        games: state.game_repo(),
        stages: state.stage_repo(),
        sections: state.section_repo(),
    };
    let game = usecase
        .execute(CreateGameInput {
            stage_id: body.stage_id,
            section_id: body.section_id,
            label: body.label,
            image: body.image,
            num_order: body.num_order,
            locale: body.locale.unwrap_or_default(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(game.into())))
}

// ── PUT /games/{id} ──────────────────────────────────────────────────────────

pub async fn update_game(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<GameBody>,
) -> Result<Json<GameResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = UpdateGameUseCase {
        games: state.game_repo(),
        stages: state.stage_repo(),
        sections: state.section_repo(),
    };
    let game = usecase
        .execute(
            id,
            UpdateGameInput {
                stage_id: body.stage_id,
                section_id: body.section_id,
                label: body.label,
                image: body.image,
                num_order: body.num_order,
                locale: body.locale.unwrap_or_default(),
            },
        )
        .await?;
    Ok(Json(game.into()))
}

// ── DELETE /games/{id} ───────────────────────────────────────────────────────

pub async fn delete_game(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = DeleteGameUseCase {
        games: state.game_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
