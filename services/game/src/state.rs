use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbGameRepository, DbQuestionRepository, DbSectionRepository, DbStageRepository,
    DbUserRepository,
};
use crate::infra::images::LocalImageStore;
use crate::infra::progress::DbProgressRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_secret: String,
    pub images: LocalImageStore,
}

impl AppState {
    pub fn stage_repo(&self) -> DbStageRepository {
        DbStageRepository {
            db: self.db.clone(),
        }
    }

    pub fn section_repo(&self) -> DbSectionRepository {
        DbSectionRepository {
            db: self.db.clone(),
        }
    }

    pub fn game_repo(&self) -> DbGameRepository {
        DbGameRepository {
            db: self.db.clone(),
        }
    }

    pub fn question_repo(&self) -> DbQuestionRepository {
        DbQuestionRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn progress_repo(&self) -> DbProgressRepository {
        DbProgressRepository {
            db: self.db.clone(),
        }
    }

    pub fn image_store(&self) -> LocalImageStore {
        self.images.clone()
    }
}
