#![allow(async_fn_in_trait)]

use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::pagination::PageRequest;

use crate::domain::types::{
    AdvanceOutcome, Answer, Game, LedgerEntry, Question, QuestionWithAnswers, Section, Stage,
    StageParagraph, User,
};
use crate::error::GameServiceError;

/// Repository for stages and their description paragraphs.
pub trait StageRepository: Send + Sync {
    async fn list(&self, locale: Option<Locale>) -> Result<Vec<Stage>, GameServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Stage>, GameServiceError>;
    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Stage>, GameServiceError>;
    /// Lowest-ordered stage of a locale — the onboarding seed.
    async fn first(&self, locale: Locale) -> Result<Option<Stage>, GameServiceError>;
    async fn paragraphs(&self, stage_id: Uuid) -> Result<Vec<StageParagraph>, GameServiceError>;
    /// Insert a stage and its paragraph list in one transaction.
    async fn create(&self, stage: &Stage, paragraphs: &[String]) -> Result<(), GameServiceError>;
    /// Update a stage, replacing its paragraph list wholesale, in one transaction.
    async fn update(&self, stage: &Stage, paragraphs: &[String]) -> Result<(), GameServiceError>;
    /// Delete a stage. Descendant games, questions, answers, paragraphs and
    /// ledger rows go with it (storage-level cascade). Returns `true` if a
    /// row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError>;
}

/// Repository for sections.
pub trait SectionRepository: Send + Sync {
    async fn list(&self, locale: Option<Locale>) -> Result<Vec<Section>, GameServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Section>, GameServiceError>;
    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Section>, GameServiceError>;
    /// Lowest-ordered section of a locale — the onboarding seed.
    async fn first(&self, locale: Locale) -> Result<Option<Section>, GameServiceError>;
    async fn create(&self, section: &Section) -> Result<(), GameServiceError>;
    async fn update(&self, section: &Section) -> Result<(), GameServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError>;
}

/// Repository for games and their question/answer trees.
pub trait GameRepository: Send + Sync {
    async fn list(
        &self,
        locale: Option<Locale>,
        stage_id: Option<Uuid>,
    ) -> Result<Vec<Game>, GameServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Game>, GameServiceError>;
    /// The advancer's lookup: the unique game at `num_order` in a locale.
    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Game>, GameServiceError>;
    /// Lowest-ordered game of a stage (optionally within a section) — the
    /// onboarding seed.
    async fn first_in(
        &self,
        stage_id: Uuid,
        section_id: Option<Uuid>,
    ) -> Result<Option<Game>, GameServiceError>;
    /// Questions of a game with their answers, in display order.
    async fn questions_with_answers(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<QuestionWithAnswers>, GameServiceError>;
    async fn create(&self, game: &Game) -> Result<(), GameServiceError>;
    async fn update(&self, game: &Game) -> Result<(), GameServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError>;
}

/// Repository for questions and their answers.
pub trait QuestionRepository: Send + Sync {
    /// All questions (optionally of one game) with answers, ordered by position.
    async fn list(
        &self,
        game_id: Option<Uuid>,
    ) -> Result<Vec<QuestionWithAnswers>, GameServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Question>, GameServiceError>;
    /// Insert a question and its initial answers in one transaction.
    async fn create(
        &self,
        question: &Question,
        answers: &[Answer],
    ) -> Result<(), GameServiceError>;
    async fn update(&self, question: &Question) -> Result<(), GameServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError>;

    async fn answers_of(&self, question_id: Uuid) -> Result<Vec<Answer>, GameServiceError>;
    async fn find_answer(&self, id: Uuid) -> Result<Option<Answer>, GameServiceError>;
    async fn create_answer(&self, answer: &Answer) -> Result<(), GameServiceError>;
    async fn update_answer(&self, answer: &Answer) -> Result<(), GameServiceError>;
    async fn delete_answer(&self, id: Uuid) -> Result<bool, GameServiceError>;
}

/// Repository for bridged user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, GameServiceError>;
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, GameServiceError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, GameServiceError>;
    async fn create(&self, user: &User) -> Result<(), GameServiceError>;
    async fn update(&self, user: &User) -> Result<(), GameServiceError>;
    /// Delete a user and, by cascade, their ledger. Returns `true` if a row
    /// was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError>;
}

/// Repository for the progress ledger. The two mutating operations are
/// transactional as a whole — no partial writes survive a failure.
pub trait ProgressRepository: Send + Sync {
    /// The entry behind the user's progress pointer, while still CURRENT.
    async fn find_current(&self, user_id: Uuid) -> Result<Option<LedgerEntry>, GameServiceError>;
    /// Whether the user has any ledger history (onboarding idempotency probe).
    async fn has_any(&self, user_id: Uuid) -> Result<bool, GameServiceError>;
    /// Audit trail, newest first.
    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, GameServiceError>;
    /// Insert the seed entry and move the user's pointer to it, atomically.
    async fn create_initial(&self, entry: &LedgerEntry) -> Result<(), GameServiceError>;
    /// Finalize the current entry with `score` and materialize the next one
    /// (guarded update, next-game lookup, pointer move) in one transaction.
    /// `AlreadyFinalized` when the guarded update matches no row — double
    /// submission or a lost concurrent race.
    async fn advance_current(
        &self,
        user_id: Uuid,
        score: i32,
    ) -> Result<AdvanceOutcome, GameServiceError>;
}

/// Port for storing uploaded images. The local-filesystem impl stands in
/// for an object-storage provider; both return a stable public URL.
pub trait ImageStore: Send + Sync {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, GameServiceError>;
}
