use chrono::Utc;
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::status::ProgressStatus;

use crate::domain::repository::{GameRepository, SectionRepository, StageRepository};
use crate::domain::types::Game;
use crate::error::GameServiceError;

// ── CreateGame ───────────────────────────────────────────────────────────────

pub struct CreateGameInput {
    pub stage_id: Uuid,
    pub section_id: Option<Uuid>,
    pub label: String,
    pub image: Option<String>,
    pub num_order: i32,
    pub locale: Locale,
}

pub struct CreateGameUseCase<G: GameRepository, S: StageRepository, C: SectionRepository> {
    pub games: G,
    pub stages: S,
    pub sections: C,
}

impl<G: GameRepository, S: StageRepository, C: SectionRepository> CreateGameUseCase<G, S, C> {
    pub async fn execute(&self, input: CreateGameInput) -> Result<Game, GameServiceError> {
        if input.label.trim().is_empty() {
            return Err(GameServiceError::validation("label is required"));
        }
        if self.stages.find(input.stage_id).await?.is_none() {
            return Err(GameServiceError::StageNotFound);
        }
        if let Some(section_id) = input.section_id {
            if self.sections.find(section_id).await?.is_none() {
                return Err(GameServiceError::SectionNotFound);
            }
        }
        if self
            .games
            .find_by_order(input.locale, input.num_order)
            .await?
            .is_some()
        {
            return Err(GameServiceError::DuplicateOrder);
        }

        let now = Utc::now();
        let game = Game {
            id: Uuid::now_v7(),
            stage_id: input.stage_id,
            section_id: input.section_id,
            label: input.label,
            image: input.image,
            num_order: input.num_order,
            locale: input.locale,
            status: ProgressStatus::New,
            created_at: now,
            updated_at: now,
        };
        self.games.create(&game).await?;
        Ok(game)
    }
}

// ── UpdateGame ───────────────────────────────────────────────────────────────

pub struct UpdateGameInput {
    pub stage_id: Uuid,
    pub section_id: Option<Uuid>,
    pub label: String,
    pub image: Option<String>,
    pub num_order: i32,
    pub locale: Locale,
}

pub struct UpdateGameUseCase<G: GameRepository, S: StageRepository, C: SectionRepository> {
    pub games: G,
    pub stages: S,
    pub sections: C,
}

impl<G: GameRepository, S: StageRepository, C: SectionRepository> UpdateGameUseCase<G, S, C> {
    pub async fn execute(&self, id: Uuid, input: UpdateGameInput) -> Result<Game, GameServiceError> {
        let existing = self
            .games
            .find(id)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;

        if input.label.trim().is_empty() {
            return Err(GameServiceError::validation("label is required"));
        }
        if self.stages.find(input.stage_id).await?.is_none() {
            return Err(GameServiceError::StageNotFound);
        }
        if let Some(section_id) = input.section_id {
            if self.sections.find(section_id).await?.is_none() {
                return Err(GameServiceError::SectionNotFound);
            }
        }
        let order_taken = self
            .games
            .find_by_order(input.locale, input.num_order)
            .await?
            .is_some_and(|other| other.id != id);
        if order_taken {
            return Err(GameServiceError::DuplicateOrder);
        }

        let game = Game {
            id,
            stage_id: input.stage_id,
            section_id: input.section_id,
            label: input.label,
            image: input.image,
            num_order: input.num_order,
            locale: input.locale,
            status: existing.status,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.games.update(&game).await?;
        Ok(game)
    }
}

// ── GetGame / ListGames ──────────────────────────────────────────────────────

pub struct GetGameUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> GetGameUseCase<G> {
    pub async fn execute(&self, id: Uuid) -> Result<Game, GameServiceError> {
        self.games
            .find(id)
            .await?
            .ok_or(GameServiceError::GameNotFound)
    }
}

pub struct ListGamesUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> ListGamesUseCase<G> {
    pub async fn execute(
        &self,
        locale: Option<Locale>,
        stage_id: Option<Uuid>,
    ) -> Result<Vec<Game>, GameServiceError> {
        self.games.list(locale, stage_id).await
    }
}

// ── DeleteGame ───────────────────────────────────────────────────────────────

pub struct DeleteGameUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> DeleteGameUseCase<G> {
    pub async fn execute(&self, id: Uuid) -> Result<(), GameServiceError> {
        let deleted = self.games.delete(id).await?;
        if !deleted {
            return Err(GameServiceError::GameNotFound);
        }
        Ok(())
    }
}
