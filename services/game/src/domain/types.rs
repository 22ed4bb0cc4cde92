use chrono::{DateTime, Utc};
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::role::UserRole;
use qbm_domain::status::ProgressStatus;

/// Top-level catalog unit.
#[derive(Debug, Clone)]
pub struct Stage {
    pub id: Uuid,
    pub title: String,
    pub label: String,
    pub image: String,
    pub num_order: i32,
    pub locale: Locale,
    pub status: ProgressStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One ordered description paragraph of a stage.
#[derive(Debug, Clone)]
pub struct StageParagraph {
    pub id: Uuid,
    pub stage_id: Uuid,
    pub body: String,
    pub position: i32,
}

/// Sub-grouping of games.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub label: String,
    pub num_order: i32,
    pub locale: Locale,
    pub status: ProgressStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The playable unit.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: Uuid,
    pub stage_id: Uuid,
    pub section_id: Option<Uuid>,
    pub label: String,
    pub image: Option<String>,
    pub num_order: i32,
    pub locale: Locale,
    pub status: ProgressStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A question of a game.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: Uuid,
    pub game_id: Uuid,
    pub body: String,
    pub locale: Locale,
    pub position: i32,
}

/// A proposed answer to a question.
#[derive(Debug, Clone)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub body: String,
    pub locale: Locale,
    pub is_correct: bool,
}

/// A question together with its answers, in display order.
#[derive(Debug, Clone)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// Account bridged from the external authentication provider.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub subject: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub locale: Locale,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub current_entry_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One progress-ledger row ("palmarès").
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub stage_id: Uuid,
    pub section_id: Option<Uuid>,
    pub game_id: Uuid,
    pub stage_label: String,
    pub section_label: Option<String>,
    pub game_label: String,
    pub stage_order: i32,
    pub section_order: Option<i32>,
    pub game_order: i32,
    pub position: i32,
    pub locale: Locale,
    pub score: i32,
    pub is_finished: bool,
    pub status_stage: ProgressStatus,
    pub status_section: ProgressStatus,
    pub status_game: ProgressStatus,
    pub created_at: DateTime<Utc>,
}

/// Lightweight catalog references returned by the advancer.
#[derive(Debug, Clone)]
pub struct StageRef {
    pub id: Uuid,
    pub title: String,
    pub label: String,
    pub num_order: i32,
}

#[derive(Debug, Clone)]
pub struct SectionRef {
    pub id: Uuid,
    pub title: String,
    pub label: String,
    pub num_order: i32,
}

#[derive(Debug, Clone)]
pub struct GameRef {
    pub id: Uuid,
    pub label: String,
    pub num_order: i32,
}

/// Where the advancer landed.
#[derive(Debug, Clone)]
pub struct NextStep {
    pub entry_id: Uuid,
    pub stage: StageRef,
    pub section: Option<SectionRef>,
    pub game: GameRef,
}

/// Result of advancing past a completed game.
#[derive(Debug, Clone)]
pub enum AdvanceOutcome {
    /// A next game exists; a new CURRENT entry was created for it.
    Advanced(NextStep),
    /// The catalog is exhausted. Terminal, not an error; no entry created.
    Finished,
}

/// The player's current position with its catalog context.
#[derive(Debug, Clone)]
pub struct CurrentProgress {
    pub entry: LedgerEntry,
    pub stage: Stage,
    pub paragraphs: Vec<StageParagraph>,
    pub section: Option<Section>,
    pub game: Game,
}

/// One submitted answer selection.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSelection {
    pub question_id: Uuid,
    pub answer_id: Uuid,
}

/// Outcome of scoring a set of selections against a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: i32,
    pub total: i32,
}
