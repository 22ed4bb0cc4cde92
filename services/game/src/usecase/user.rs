use chrono::Utc;
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::pagination::PageRequest;
use qbm_domain::role::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::GameServiceError;

// ── GetUser / ListUsers ──────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<User, GameServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(GameServiceError::UserNotFound)
    }
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<User>, GameServiceError> {
        self.repo.list(page).await
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub locale: Locale,
    pub country: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateUserInput) -> Result<User, GameServiceError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(GameServiceError::UserNotFound)?;
        if input.email.trim().is_empty() {
            return Err(GameServiceError::validation("email is required"));
        }

        let user = User {
            id,
            subject: existing.subject,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            role: input.role,
            locale: input.locale,
            country: input.country,
            phone: input.phone,
            current_entry_id: existing.current_entry_id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.repo.update(&user).await?;
        Ok(user)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), GameServiceError> {
        let deleted = self.repo.delete(id).await?;
        if !deleted {
            return Err(GameServiceError::UserNotFound);
        }
        Ok(())
    }
}
