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

use crate::domain::types::{Answer, Question, QuestionWithAnswers};
use crate::error::GameServiceError;
use crate::handlers::require;
use crate::state::AppState;
use crate::usecase::question::{
    CreateAnswerInput, CreateAnswerUseCase, CreateQuestionInput, CreateQuestionUseCase,
    DeleteAnswerUseCase, DeleteQuestionUseCase, ListAnswersUseCase, ListQuestionsUseCase,
    NewAnswer, UpdateAnswerInput, UpdateAnswerUseCase, UpdateQuestionInput, UpdateQuestionUseCase,
};

// ── Admin-facing response types (include correctness flags) ──────────────────

#[derive(Serialize)]
pub struct AnswerResponse {
    pub id: String,
    pub question_id: String,
    pub body: String,
    pub locale: Locale,
    pub is_correct: bool,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: answer.id.to_string(),
            question_id: answer.question_id.to_string(),
            body: answer.body,
            locale: answer.locale,
            is_correct: answer.is_correct,
        }
    }
}

#[derive(Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub game_id: String,
    pub body: String,
    pub locale: Locale,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerResponse>>,
}

impl QuestionResponse {
    fn from_question(question: Question, answers: Option<Vec<Answer>>) -> Self {
        Self {
            id: question.id.to_string(),
            game_id: question.game_id.to_string(),
            body: question.body,
            locale: question.locale,
            position: question.position,
            answers: answers.map(|list| list.into_iter().map(Into::into).collect()),
        }
    }

    fn from_tree(tree: QuestionWithAnswers) -> Self {
        Self::from_question(tree.question, Some(tree.answers))
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AnswerBody {
    pub body: String,
    pub locale: Option<Locale>,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Deserialize)]
pub struct CreateQuestionBody {
    pub game_id: Uuid,
    pub body: String,
    pub locale: Option<Locale>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub answers: Vec<AnswerBody>,
}

#[derive(Deserialize)]
pub struct UpdateQuestionBody {
    pub game_id: Uuid,
    pub body: String,
    pub locale: Option<Locale>,
    #[serde(default)]
    pub position: i32,
}

#[derive(Deserialize)]
pub struct CreateAnswerBody {
    pub question_id: Uuid,
    pub body: String,
    pub locale: Option<Locale>,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Deserialize)]
pub struct UpdateAnswerBody {
    pub body: String,
    pub locale: Locale,
    pub is_correct: bool,
}

#[derive(Deserialize, Default)]
pub struct QuestionListQuery {
    pub game_id: Option<Uuid>,
}

// ── GET /questions ───────────────────────────────────────────────────────────

pub async fn list_questions(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<QuestionListQuery>,
) -> Result<Json<Vec<QuestionResponse>>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = ListQuestionsUseCase {
        questions: state.question_repo(),
    };
    let questions = usecase.execute(query.game_id).await?;
    Ok(Json(
        questions
            .into_iter()
            .map(QuestionResponse::from_tree)
            .collect(),
    ))
}

// ── POST /questions ──────────────────────────────────────────────────────────

pub async fn create_question(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateQuestionBody>,
) -> Result<(StatusCode, Json<QuestionResponse>), GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = CreateQuestionUseCase {
        questions: state.question_repo(),
        games: state.game_repo(),
    };
    let created = usecase
        .execute(CreateQuestionInput {
            game_id: body.game_id,
            body: body.body,
            locale: body.locale.unwrap_or_default(),
            position: body.position,
            answers: body
                .answers
                .into_iter()
                .map(|a| NewAnswer {
                    body: a.body,
                    locale: a.locale,
                    is_correct: a.is_correct,
                })
                .collect(),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(QuestionResponse::from_tree(created)),
    ))
}

// ── PUT /questions/{id} ──────────────────────────────────────────────────────

pub async fn update_question(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateQuestionBody>,
) -> Result<Json<QuestionResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = UpdateQuestionUseCase {
        questions: state.question_repo(),
        games: state.game_repo(),
    };
    let question = usecase
        .execute(
            id,
            UpdateQuestionInput {
                game_id: body.game_id,
                body: body.body,
                locale: body.locale.unwrap_or_default(),
                position: body.position,
            },
        )
        .await?;
    Ok(Json(QuestionResponse::from_question(question, None)))
}

// ── DELETE /questions/{id} ───────────────────────────────────────────────────

pub async fn delete_question(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = DeleteQuestionUseCase {
        questions: state.question_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /answers ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AnswerListQuery {
    pub question_id: Uuid,
}

pub async fn list_answers(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<AnswerListQuery>,
) -> Result<Json<Vec<AnswerResponse>>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = ListAnswersUseCase {
        questions: state.question_repo(),
    };
    let answers = usecase.execute(query.question_id).await?;
    Ok(Json(answers.into_iter().map(Into::into).collect()))
}

// ── POST /answers ────────────────────────────────────────────────────────────

pub async fn create_answer(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateAnswerBody>,
) -> Result<(StatusCode, Json<AnswerResponse>), GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = CreateAnswerUseCase {
        questions: state.question_repo(),
    };
    let answer = usecase
        .execute(CreateAnswerInput {
            question_id: body.question_id,
            body: body.body,
            locale: body.locale,
            is_correct: body.is_correct,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(answer.into())))
}

// ── PUT /answers/{id} ────────────────────────────────────────────────────────

pub async fn update_answer(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAnswerBody>,
) -> Result<Json<AnswerResponse>, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = UpdateAnswerUseCase {
        questions: state.question_repo(),
    };
    let answer = usecase
        .execute(
            id,
            UpdateAnswerInput {
                body: body.body,
                locale: body.locale,
                is_correct: body.is_correct,
            },
        )
        .await?;
    Ok(Json(answer.into()))
}

// ── DELETE /answers/{id} ─────────────────────────────────────────────────────

pub async fn delete_answer(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GameServiceError> {
    require(&identity, UserRole::Admin)?;
    let usecase = DeleteAnswerUseCase {
        questions: state.question_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
