use chrono::Utc;
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::role::UserRole;
use qbm_domain::status::ProgressStatus;

use crate::domain::repository::{
    GameRepository, ProgressRepository, SectionRepository, StageRepository, UserRepository,
};
use crate::domain::types::{LedgerEntry, User};
use crate::error::GameServiceError;

pub struct OnboardInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<UserRole>,
    pub locale: Option<Locale>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

pub struct OnboardOutput {
    pub user: User,
    /// A user row was created by this call.
    pub created: bool,
    /// The first ledger entry was created by this call.
    pub seeded: bool,
}

/// Bridge an external identity to a local account and seed the first ledger
/// entry. Idempotent on both: an existing user or existing ledger history is
/// reported back, never duplicated.
pub struct OnboardUserUseCase<U, S, C, G, P>
where
    U: UserRepository,
    S: StageRepository,
    C: SectionRepository,
    G: GameRepository,
    P: ProgressRepository,
{
    pub users: U,
    pub stages: S,
    pub sections: C,
    pub games: G,
    pub progress: P,
}

impl<U, S, C, G, P> OnboardUserUseCase<U, S, C, G, P>
where
    U: UserRepository,
    S: StageRepository,
    C: SectionRepository,
    G: GameRepository,
    P: ProgressRepository,
{
    pub async fn execute(
        &self,
        subject: &str,
        fallback_locale: Locale,
        input: OnboardInput,
    ) -> Result<OnboardOutput, GameServiceError> {
        let role = input.role.unwrap_or(UserRole::Player);
        // Admin is only grantable through the users CRUD by an existing admin.
        if role == UserRole::Admin {
            return Err(GameServiceError::Forbidden);
        }

        let (user, created) = match self.users.find_by_subject(subject).await? {
            Some(user) => (user, false),
            None => {
                if input.email.trim().is_empty() {
                    return Err(GameServiceError::validation("email is required"));
                }
                let now = Utc::now();
                let user = User {
                    id: Uuid::now_v7(),
                    subject: subject.to_owned(),
                    email: input.email,
                    first_name: input.first_name,
                    last_name: input.last_name,
                    role,
                    locale: input.locale.unwrap_or(fallback_locale),
                    country: input.country,
                    phone: input.phone,
                    current_entry_id: None,
                    created_at: now,
                    updated_at: now,
                };
                self.users.create(&user).await?;
                (user, true)
            }
        };

        let mut seeded = false;
        if user.role == UserRole::Player && !self.progress.has_any(user.id).await? {
            let entry = self.seed_entry(&user).await?;
            self.progress.create_initial(&entry).await?;
            seeded = true;
        }

        Ok(OnboardOutput {
            user,
            created,
            seeded,
        })
    }

    /// First stage of the user's locale, its lowest-ordered game, and that
    /// game's section if it has one.
    async fn seed_entry(&self, user: &User) -> Result<LedgerEntry, GameServiceError> {
        let stage = self
            .stages
            .first(user.locale)
            .await?
            .ok_or(GameServiceError::StageNotFound)?;
        let game = self
            .games
            .first_in(stage.id, None)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;
        let section = match game.section_id {
            Some(section_id) => self.sections.find(section_id).await?,
            None => None,
        };

        Ok(LedgerEntry {
            id: Uuid::now_v7(),
            user_id: user.id,
            stage_id: stage.id,
            section_id: game.section_id,
            game_id: game.id,
            stage_label: stage.label.clone(),
            section_label: section.as_ref().map(|s| s.label.clone()),
            game_label: game.label.clone(),
            stage_order: stage.num_order,
            section_order: section.as_ref().map(|s| s.num_order),
            game_order: game.num_order,
            position: 1,
            locale: user.locale,
            score: 0,
            is_finished: false,
            status_stage: ProgressStatus::Current,
            status_section: ProgressStatus::Current,
            status_game: ProgressStatus::Current,
            created_at: Utc::now(),
        })
    }
}
