use chrono::Utc;
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::status::ProgressStatus;

use crate::domain::repository::StageRepository;
use crate::domain::types::{Stage, StageParagraph};
use crate::error::GameServiceError;

// ── CreateStage ──────────────────────────────────────────────────────────────

pub struct CreateStageInput {
    pub title: String,
    pub label: String,
    pub image: String,
    pub num_order: i32,
    pub locale: Locale,
    pub paragraphs: Vec<String>,
}

pub struct CreateStageUseCase<R: StageRepository> {
    pub repo: R,
}

impl<R: StageRepository> CreateStageUseCase<R> {
    pub async fn execute(&self, input: CreateStageInput) -> Result<Stage, GameServiceError> {
        if input.title.trim().is_empty() {
            return Err(GameServiceError::validation("title is required"));
        }
        if input.label.trim().is_empty() {
            return Err(GameServiceError::validation("label is required"));
        }
        if input.image.trim().is_empty() {
            return Err(GameServiceError::validation("image is required"));
        }
        if self
            .repo
            .find_by_order(input.locale, input.num_order)
            .await?
            .is_some()
        {
            return Err(GameServiceError::DuplicateOrder);
        }

        let now = Utc::now();
        let stage = Stage {
            id: Uuid::now_v7(),
            title: input.title,
            label: input.label,
            image: input.image,
            num_order: input.num_order,
            locale: input.locale,
            status: ProgressStatus::New,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&stage, &input.paragraphs).await?;
        Ok(stage)
    }
}

// ── UpdateStage ──────────────────────────────────────────────────────────────

pub struct UpdateStageInput {
    pub title: String,
    pub label: String,
    pub image: String,
    pub num_order: i32,
    pub locale: Locale,
    pub paragraphs: Vec<String>,
}

pub struct UpdateStageUseCase<R: StageRepository> {
    pub repo: R,
}

impl<R: StageRepository> UpdateStageUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateStageInput,
    ) -> Result<Stage, GameServiceError> {
        let existing = self
            .repo
            .find(id)
            .await?
            .ok_or(GameServiceError::StageNotFound)?;

        if input.title.trim().is_empty() {
            return Err(GameServiceError::validation("title is required"));
        }
        let order_taken = self
            .repo
            .find_by_order(input.locale, input.num_order)
            .await?
            .is_some_and(|other| other.id != id);
        if order_taken {
            return Err(GameServiceError::DuplicateOrder);
        }

        let stage = Stage {
            id,
            title: input.title,
            label: input.label,
            image: input.image,
            num_order: input.num_order,
            locale: input.locale,
            status: existing.status,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.repo.update(&stage, &input.paragraphs).await?;
        Ok(stage)
    }
}

// ── GetStage / ListStages ────────────────────────────────────────────────────

pub struct GetStageUseCase<R: StageRepository> {
    pub repo: R,
}

impl<R: StageRepository> GetStageUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
    ) -> Result<(Stage, Vec<StageParagraph>), GameServiceError> {
        let stage = self
            .repo
            .find(id)
            .await?
            .ok_or(GameServiceError::StageNotFound)?;
        let paragraphs = self.repo.paragraphs(id).await?;
        Ok((stage, paragraphs))
    }
}

pub struct ListStagesUseCase<R: StageRepository> {
    pub repo: R,
}

impl<R: StageRepository> ListStagesUseCase<R> {
    pub async fn execute(&self, locale: Option<Locale>) -> Result<Vec<Stage>, GameServiceError> {
        self.repo.list(locale).await
    }
}

// ── DeleteStage ──────────────────────────────────────────────────────────────

pub struct DeleteStageUseCase<R: StageRepository> {
    pub repo: R,
}

impl<R: StageRepository> DeleteStageUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), GameServiceError> {
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            return Err(GameServiceError::StageNotFound);
        }
        Ok(())
    }
}
