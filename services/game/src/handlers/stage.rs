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

use crate::domain::types::{Stage, StageParagraph};
use crate::error::GameServiceError;
use crate::handlers::require;
use crate::state::AppState;
use crate::usecase::stage::{
    CreateStageInput, CreateStageUseCase, DeleteStageUseCase, GetStageUseCase, ListStagesUseCase,
    UpdateStageInput, UpdateStageUseCase,
};

// ── Shared types ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StageResponse {
    pub id: String,
    pub title: String,
    pub label: String,
    pub image: String,
    pub num_order: i32,
    pub locale: Locale,
    pub status: ProgressStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<String>>,
    #[serde(serialize_with = "qbm_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "qbm_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl StageResponse {
    fn from_stage(stage: Stage, paragraphs: Option<Vec<StageParagraph>>) -> Self {
        Self {
            id: stage.id.to_string(),
            title: stage.title,
            label: stage.label,
            image: stage.image,
            num_order: stage.num_order,
            locale: stage.locale,
            status: stage.status,
            paragraphs: paragraphs.map(|ps| ps.into_iter().map(|p| p.body).collect()),
            created_at: stage.created_at,
            updated_at: stage.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct StageBody {
    pub title: String,
    pub label: String,
    pub image: String,
    pub num_order: i32,
    pub locale: Option<Locale>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

#[derive(Deserialize, Default)]
pub struct CatalogListQuery {
    pub locale: Option<Locale>,
}

// ── GET /stages ──────────────────────────────────────────────────────────────

pub async fn list_stages(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<CatalogListQuery>,
) -> Result<Json<Vec<StageResponse>>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = ListStagesUseCase {
        repo: state.stage_repo(),
    };
    let stages = usecase.execute(query.locale).await?;
    let items = stages
        .into_iter()
        .map(|s| StageResponse::from_stage(s, None))
        .collect();
    Ok(Json(items))
}

// ── GET /stages/{id} ─────────────────────────────────────────────────────────

pub async fn get_stage(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StageResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = GetStageUseCase {
        repo: state.stage_repo(),
    };
    let (stage, paragraphs) = usecase.execute(id).await?;
    Ok(Json(StageResponse::from_stage(stage, Some(paragraphs))))
}

// ── POST /stages ─────────────────────────────────────────────────────────────

pub async fn create_stage(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<StageBody>,
) -> Result<(StatusCode, Json<StageResponse>), GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = CreateStageUseCase {
        repo: state.stage_repo(),
    };
    let stage = usecase
        .execute(CreateStageInput {
            title: body.title,
            label: body.label,
            image: body.image,
            num_order: body.num_order,
            locale: body.locale.unwrap_or_default(),
            paragraphs: body.paragraphs,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StageResponse::from_stage(stage, None)),
    ))
}

// ── PUT /stages/{id} ─────────────────────────────────────────────────────────

pub async fn update_stage(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StageBody>,
) -> Result<Json<StageResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = UpdateStageUseCase {
        repo: state.stage_repo(),
    };
    let stage = usecase
        .execute(
            id,
            UpdateStageInput {
                title: body.title,
                label: body.label,
                image: body.image,
                num_order: body.num_order,
                locale: body.locale.unwrap_or_default(),
                paragraphs: body.paragraphs,
            },
        )
        .await?;
    Ok(Json(StageResponse::from_stage(stage, None)))
}

// ── DELETE /stages/{id} ──────────────────────────────────────────────────────

pub async fn delete_stage(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = DeleteStageUseCase {
        repo: state.stage_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
