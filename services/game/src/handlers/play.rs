use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qbm_auth_types::identity::Identity;
use qbm_domain::locale::Locale;
use qbm_domain::status::ProgressStatus;

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    AdvanceOutcome, AnswerSelection, GameRef, LedgerEntry, NextStep, QuestionWithAnswers,
    SectionRef, StageRef, User,
};
use crate::error::GameServiceError;
use crate::handlers::require_player;
use crate::handlers::section::SectionResponse;
use crate::handlers::stage::StageResponse;
use crate::state::AppState;
use crate::usecase::progress::{
    AdvanceProgressUseCase, GetCurrentGameUseCase, GetHistoryUseCase, GetProgressUseCase,
    ScoreCurrentGameUseCase,
};

async fn current_player(
    identity: &Identity,
    state: &AppState,
) -> Result<User, GameServiceError> {
    require_player(identity)?;
    state
        .user_repo()
        .find_by_subject(&identity.subject)
        .await?
        .ok_or(GameServiceError::UserNotFound)
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EntryResponse {
    pub id: String,
    pub position: i32,
    pub stage_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    pub game_label: String,
    pub stage_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_order: Option<i32>,
    pub game_order: i32,
    pub locale: Locale,
    pub score: i32,
    pub is_finished: bool,
    pub status_stage: ProgressStatus,
    pub status_section: ProgressStatus,
    pub status_game: ProgressStatus,
    #[serde(serialize_with = "qbm_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<LedgerEntry> for EntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            position: entry.position,
            stage_label: entry.stage_label,
            section_label: entry.section_label,
            game_label: entry.game_label,
            stage_order: entry.stage_order,
            section_order: entry.section_order,
            game_order: entry.game_order,
            locale: entry.locale,
            score: entry.score,
            is_finished: entry.is_finished,
            status_stage: entry.status_stage,
            status_section: entry.status_section,
            status_game: entry.status_game,
            created_at: entry.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ProgressResponse {
    pub entry: EntryResponse,
    pub stage: StageResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionResponse>,
    pub game: PlayGameSummary,
}

#[derive(Serialize)]
pub struct PlayGameSummary {
    pub id: String,
    pub label: String,
    pub num_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub locale: Locale,
}

/// Player-facing question payload — correctness flags stay server-side.
#[derive(Serialize)]
pub struct PlayQuestion {
    pub id: String,
    pub body: String,
    pub position: i32,
    pub answers: Vec<PlayAnswer>,
}

#[derive(Serialize)]
pub struct PlayAnswer {
    pub id: String,
    pub body: String,
}

fn play_question(tree: QuestionWithAnswers) -> PlayQuestion {
    PlayQuestion {
        id: tree.question.id.to_string(),
        body: tree.question.body,
        position: tree.question.position,
        answers: tree
            .answers
            .into_iter()
            .map(|a| PlayAnswer {
                id: a.id.to_string(),
                body: a.body,
            })
            .collect(),
    }
}

#[derive(Serialize)]
pub struct CurrentGameResponse {
    pub entry: EntryResponse,
    pub game: PlayGameSummary,
    pub questions: Vec<PlayQuestion>,
}

#[derive(Serialize)]
pub struct StageRefResponse {
    pub id: String,
    pub title: String,
    pub label: String,
    pub num_order: i32,
}

impl From<StageRef> for StageRefResponse {
    fn from(stage: StageRef) -> Self {
        Self {
            id: stage.id.to_string(),
            title: stage.title,
            label: stage.label,
            num_order: stage.num_order,
        }
    }
}

#[derive(Serialize)]
pub struct SectionRefResponse {
    pub id: String,
    pub title: String,
    pub label: String,
    pub num_order: i32,
}

impl From<SectionRef> for SectionRefResponse {
    fn from(section: SectionRef) -> Self {
        Self {
            id: section.id.to_string(),
            title: section.title,
            label: section.label,
            num_order: section.num_order,
        }
    }
}

#[derive(Serialize)]
pub struct GameRefResponse {
    pub id: String,
    pub label: String,
    pub num_order: i32,
}

impl From<GameRef> for GameRefResponse {
    fn from(game: GameRef) -> Self {
        Self {
            id: game.id.to_string(),
            label: game.label,
            num_order: game.num_order,
        }
    }
}

#[derive(Serialize)]
pub struct NextStepResponse {
    pub entry_id: String,
    pub stage: StageRefResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionRefResponse>,
    pub game: GameRefResponse,
}

impl From<NextStep> for NextStepResponse {
    fn from(step: NextStep) -> Self {
        Self {
            entry_id: step.entry_id.to_string(),
            stage: step.stage.into(),
            section: step.section.map(Into::into),
            game: step.game.into(),
        }
    }
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub score: i32,
    pub total: i32,
    pub finished: bool,
    pub milestone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextStepResponse>,
}

// ── GET /play/progress ───────────────────────────────────────────────────────

pub async fn get_progress(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProgressResponse>, GameServiceError> {
    let user = current_player(&identity, &state).await?;
    let usecase = GetProgressUseCase {
        progress: state.progress_repo(),
        stages: state.stage_repo(),
        sections: state.section_repo(),
        games: state.game_repo(),
    };
    let progress = usecase.execute(user.id).await?;

    Ok(Json(ProgressResponse {
        entry: progress.entry.into(),
        stage: stage_with_paragraphs(progress.stage, progress.paragraphs),
        section: progress.section.map(Into::into),
        game: PlayGameSummary {
            id: progress.game.id.to_string(),
            label: progress.game.label,
            num_order: progress.game.num_order,
            image: progress.game.image,
            locale: progress.game.locale,
        },
    }))
}

fn stage_with_paragraphs(
    stage: crate::domain::types::Stage,
    paragraphs: Vec<crate::domain::types::StageParagraph>,
) -> StageResponse {
    StageResponse {
        id: stage.id.to_string(),
        title: stage.title,
        label: stage.label,
        image: stage.image,
        num_order: stage.num_order,
        locale: stage.locale,
        status: stage.status,
        paragraphs: Some(paragraphs.into_iter().map(|p| p.body).collect()),
        created_at: stage.created_at,
        updated_at: stage.updated_at,
    }
}

// ── GET /play/game ───────────────────────────────────────────────────────────

pub async fn get_current_game(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<CurrentGameResponse>, GameServiceError> {
    let user = current_player(&identity, &state).await?;
    let usecase = GetCurrentGameUseCase {
        progress: state.progress_repo(),
        games: state.game_repo(),
    };
    let (entry, game, questions) = usecase.execute(user.id).await?;

    Ok(Json(CurrentGameResponse {
        entry: entry.into(),
        game: PlayGameSummary {
            id: game.id.to_string(),
            label: game.label,
            num_order: game.num_order,
            image: game.image,
            locale: game.locale,
        },
        questions: questions.into_iter().map(play_question).collect(),
    }))
}

// ── POST /play/submit ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SelectionBody {
    pub question_id: Uuid,
    pub answer_id: Uuid,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<SelectionBody>,
}

pub async fn submit_answers(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, GameServiceError> {
    let user = current_player(&identity, &state).await?;

    let selections: Vec<AnswerSelection> = body
        .answers
        .iter()
        .map(|s| AnswerSelection {
            question_id: s.question_id,
            answer_id: s.answer_id,
        })
        .collect();

    let scorer = ScoreCurrentGameUseCase {
        progress: state.progress_repo(),
        games: state.game_repo(),
    };
    let summary = scorer.execute(user.id, &selections).await?;

    let advancer = AdvanceProgressUseCase {
        progress: state.progress_repo(),
    };
    let advanced = advancer.execute(user.id, summary.score).await?;

    let (finished, next) = match advanced.outcome {
        AdvanceOutcome::Finished => (true, None),
        AdvanceOutcome::Advanced(step) => (false, Some(step.into())),
    };
    Ok(Json(SubmitResponse {
        score: summary.score,
        total: summary.total,
        finished,
        milestone: advanced.milestone,
        next,
    }))
}

// ── GET /play/history ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn get_history(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<EntryResponse>>, GameServiceError> {
    let user = current_player(&identity, &state).await?;
    let page = qbm_domain::pagination::PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = GetHistoryUseCase {
        progress: state.progress_repo(),
    };
    let entries = usecase.execute(user.id, page).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
