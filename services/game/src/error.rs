use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Game service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum GameServiceError {
    #[error("stage not found")]
    StageNotFound,
    #[error("section not found")]
    SectionNotFound,
    #[error("game not found")]
    GameNotFound,
    #[error("question not found")]
    QuestionNotFound,
    #[error("answer not found")]
    AnswerNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("no current ledger entry")]
    NoCurrentEntry,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("duplicate catalog order")]
    DuplicateOrder,
    #[error("entry already finalized")]
    AlreadyFinalized,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GameServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StageNotFound => "STAGE_NOT_FOUND",
            Self::SectionNotFound => "SECTION_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::QuestionNotFound => "QUESTION_NOT_FOUND",
            Self::AnswerNotFound => "ANSWER_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NoCurrentEntry => "NO_CURRENT_ENTRY",
            Self::Validation(_) => "VALIDATION",
            Self::DuplicateOrder => "DUPLICATE_ORDER",
            Self::AlreadyFinalized => "ALREADY_FINALIZED",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Shorthand for missing/invalid request fields.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl IntoResponse for GameServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::StageNotFound
            | Self::SectionNotFound
            | Self::GameNotFound
            | Self::QuestionNotFound
            | Self::AnswerNotFound
            | Self::UserNotFound
            | Self::NoCurrentEntry => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateOrder | Self::AlreadyFinalized | Self::UserAlreadyExists => {
                StatusCode::CONFLICT
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
