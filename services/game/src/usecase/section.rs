use chrono::Utc;
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::status::ProgressStatus;

use crate::domain::repository::SectionRepository;
use crate::domain::types::Section;
use crate::error::GameServiceError;

// ── CreateSection ────────────────────────────────────────────────────────────

pub struct CreateSectionInput {
    pub title: String,
    pub label: String,
    pub num_order: i32,
    pub locale: Locale,
}

pub struct CreateSectionUseCase<R: SectionRepository> {
    pub repo: R,
}

impl<R: SectionRepository> CreateSectionUseCase<R> {
    pub async fn execute(&self, input: CreateSectionInput) -> Result<Section, GameServiceError> {
        if input.title.trim().is_empty() {
            return Err(GameServiceError::validation("title is required"));
        }
        if input.label.trim().is_empty() {
            return Err(GameServiceError::validation("label is required"));
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
        let section = Section {
            id: Uuid::now_v7(),
            title: input.title,
            label: input.label,
            num_order: input.num_order,
            locale: input.locale,
            status: ProgressStatus::New,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&section).await?;
        Ok(section)
    }
}

// ── UpdateSection ────────────────────────────────────────────────────────────

pub struct UpdateSectionInput {
    pub title: String,
    pub label: String,
    pub num_order: i32,
    pub locale: Locale,
}

pub struct UpdateSectionUseCase<R: SectionRepository> {
    pub repo: R,
}

impl<R: SectionRepository> UpdateSectionUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateSectionInput,
    ) -> Result<Section, GameServiceError> {
        let existing = self
            .repo
            .find(id)
            .await?
            .ok_or(GameServiceError::SectionNotFound)?;

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

        let section = Section {
            id,
            title: input.title,
            label: input.label,
            num_order: input.num_order,
            locale: input.locale,
            status: existing.status,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.repo.update(&section).await?;
        Ok(section)
    }
}

// ── GetSection / ListSections ────────────────────────────────────────────────

pub struct GetSectionUseCase<R: SectionRepository> {
    pub repo: R,
}

impl<R: SectionRepository> GetSectionUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Section, GameServiceError> {
        self.repo
            .find(id)
            .await?
            .ok_or(GameServiceError::SectionNotFound)
    }
}

pub struct ListSectionsUseCase<R: SectionRepository> {
    pub repo: R,
}

impl<R: SectionRepository> ListSectionsUseCase<R> {
    pub async fn execute(&self, locale: Option<Locale>) -> Result<Vec<Section>, GameServiceError> {
        self.repo.list(locale).await
    }
}

// ── DeleteSection ────────────────────────────────────────────────────────────

pub struct DeleteSectionUseCase<R: SectionRepository> {
    pub repo: R,
}

impl<R: SectionRepository> DeleteSectionUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), GameServiceError> {
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            return Err(GameServiceError::SectionNotFound);
        }
        Ok(())
    }
}
