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

use crate::domain::types::Section;
use crate::error::GameServiceError;
use crate::handlers::require;
use crate::handlers::stage::CatalogListQuery;
use crate::state::AppState;
use crate::usecase::section::{
    CreateSectionInput, CreateSectionUseCase, DeleteSectionUseCase, GetSectionUseCase,
    ListSectionsUseCase, UpdateSectionInput, UpdateSectionUseCase,
};

#[derive(Serialize)]
pub struct SectionResponse {
    pub id: String,
    pub title: String,
    pub label: String,
    pub num_order: i32,
    pub locale: Locale,
    pub status: ProgressStatus,
    #[serde(serialize_with = "qbm_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "qbm_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Section> for SectionResponse {
    fn from(section: Section) -> Self {
        Self {
            id: section.id.to_string(),
            title: section.title,
            label: section.label,
            num_order: section.num_order,
            locale: section.locale,
            status: section.status,
            created_at: section.created_at,
            updated_at: section.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct SectionBody {
    pub title: String,
    pub label: String,
    pub num_order: i32,
    pub locale: Option<Locale>,
}

// ── GET /sections ────────────────────────────────────────────────────────────

pub async fn list_sections(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<CatalogListQuery>,
) -> Result<Json<Vec<SectionResponse>>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = ListSectionsUseCase {
        repo: state.section_repo(),
    };
    let sections = usecase.execute(query.locale).await?;
    Ok(Json(sections.into_iter().map(Into::into).collect()))
}

// ── GET /sections/{id} ───────────────────────────────────────────────────────

pub async fn get_section(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SectionResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = GetSectionUseCase {
        repo: state.section_repo(),
    };
    let section = usecase.execute(id).await?;
    Ok(Json(section.into()))
}

// ── POST /sections ───────────────────────────────────────────────────────────

pub async fn create_section(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<SectionBody>,
) -> Result<(StatusCode, Json<SectionResponse>), GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = CreateSectionUseCase {
        repo: state.section_repo(),
    };
    let section = usecase
        .execute(CreateSectionInput {
            title: body.title,
            label: body.label,
            num_order: body.num_order,
            locale: body.locale.unwrap_or_default(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(section.into())))
}

// ── PUT /sections/{id} ───────────────────────────────────────────────────────

pub async fn update_section(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SectionBody>,
) -> Result<Json<SectionResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = UpdateSectionUseCase {
        repo: state.section_repo(),
    };
    let section = usecase
        .execute(
            id,
            UpdateSectionInput {
                title: body.title,
                label: body.label,
                num_order: body.num_order,
                locale: body.locale.unwrap_or_default(),
            },
        )
        .await?;
    Ok(Json(section.into()))
}

// ── DELETE /sections/{id} ────────────────────────────────────────────────────

pub async fn delete_section(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = DeleteSectionUseCase {
        repo: state.section_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
