use std::collections::HashSet;

use uuid::Uuid;

use qbm_domain::pagination::PageRequest;
use qbm_domain::progress::is_milestone;

use crate::domain::repository::{
    GameRepository, ProgressRepository, SectionRepository, StageRepository,
};
use crate::domain::types::{
    AdvanceOutcome, AnswerSelection, CurrentProgress, Game, LedgerEntry, QuestionWithAnswers,
    ScoreSummary,
};
use crate::error::GameServiceError;

/// Score submitted selections against a game's question set.
///
/// One point per question whose selected answer belongs to it and is marked
/// correct. The first selection per question wins; selections for unknown
/// questions or foreign answers score nothing. A question with no correct
/// answer can never award a point, whatever was selected.
pub fn score_selections(
    questions: &[QuestionWithAnswers],
    selections: &[AnswerSelection],
) -> ScoreSummary {
    let total = questions.len() as i32;
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut score = 0;
    for selection in selections {
        if !seen.insert(selection.question_id) {
            continue;
        }
        let Some(q) = questions
            .iter()
            .find(|q| q.question.id == selection.question_id)
        else {
            continue;
        };
        if q.answers
            .iter()
            .any(|a| a.id == selection.answer_id && a.is_correct)
        {
            score += 1;
        }
    }
    ScoreSummary { score, total }
}

// ── ScoreCurrentGame ─────────────────────────────────────────────────────────

pub struct ScoreCurrentGameUseCase<P: ProgressRepository, G: GameRepository> {
    pub progress: P,
    pub games: G,
}

impl<P: ProgressRepository, G: GameRepository> ScoreCurrentGameUseCase<P, G> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        selections: &[AnswerSelection],
    ) -> Result<ScoreSummary, GameServiceError> {
        let entry = self
            .progress
            .find_current(user_id)
            .await?
            .ok_or(GameServiceError::NoCurrentEntry)?;
        let questions = self.games.questions_with_answers(entry.game_id).await?;
        Ok(score_selections(&questions, selections))
    }
}

// ── AdvanceProgress ──────────────────────────────────────────────────────────

pub struct AdvanceOutput {
    pub outcome: AdvanceOutcome,
    /// The next game sits on a checkpoint order; the board shows a
    /// transition screen before gameplay. Always false when finished.
    pub milestone: bool,
}

/// The single advancement path: finalize the current entry with the score
/// and materialize the next position, if any.
pub struct AdvanceProgressUseCase<P: ProgressRepository> {
    pub progress: P,
}

impl<P: ProgressRepository> AdvanceProgressUseCase<P> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        score: i32,
    ) -> Result<AdvanceOutput, GameServiceError> {
        if score < 0 {
            return Err(GameServiceError::validation("score must be non-negative"));
        }
        let outcome = self.progress.advance_current(user_id, score).await?;
        let milestone = match &outcome {
            AdvanceOutcome::Advanced(step) => is_milestone(step.game.num_order),
            AdvanceOutcome::Finished => false,
        };
        Ok(AdvanceOutput { outcome, milestone })
    }
}

// ── GetProgress ──────────────────────────────────────────────────────────────

pub struct GetProgressUseCase<P, S, C, G>
where
    P: ProgressRepository,
    S: StageRepository,
    C: SectionRepository,
    G: GameRepository,
{
    pub progress: P,
    pub stages: S,
    pub sections: C,
    pub games: G,
}

impl<P, S, C, G> GetProgressUseCase<P, S, C, G>
where
    P: ProgressRepository,
    S: StageRepository,
    C: SectionRepository,
    G: GameRepository,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<CurrentProgress, GameServiceError> {
        let entry = self
            .progress
            .find_current(user_id)
            .await?
            .ok_or(GameServiceError::NoCurrentEntry)?;

        let stage = self
            .stages
            .find(entry.stage_id)
            .await?
            .ok_or(GameServiceError::StageNotFound)?;
        let paragraphs = self.stages.paragraphs(stage.id).await?;
        let section = match entry.section_id {
            Some(section_id) => self.sections.find(section_id).await?,
            None => None,
        };
        let game = self
            .games
            .find(entry.game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;

        Ok(CurrentProgress {
            entry,
            stage,
            paragraphs,
            section,
            game,
        })
    }
}

// ── GetCurrentGame ───────────────────────────────────────────────────────────

pub struct GetCurrentGameUseCase<P: ProgressRepository, G: GameRepository> {
    pub progress: P,
    pub games: G,
}

impl<P: ProgressRepository, G: GameRepository> GetCurrentGameUseCase<P, G> {
    pub async fn execute(
        &self,
        user_id: Uuid,
    ) -> Result<(LedgerEntry, Game, Vec<QuestionWithAnswers>), GameServiceError> {
        let entry = self
            .progress
            .find_current(user_id)
            .await?
            .ok_or(GameServiceError::NoCurrentEntry)?;
        let game = self
            .games
            .find(entry.game_id)
            .await?
            .ok_or(GameServiceError::GameNotFound)?;
        let questions = self.games.questions_with_answers(game.id).await?;
        Ok((entry, game, questions))
    }
}

// ── GetHistory ───────────────────────────────────────────────────────────────

pub struct GetHistoryUseCase<P: ProgressRepository> {
    pub progress: P,
}

impl<P: ProgressRepository> GetHistoryUseCase<P> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, GameServiceError> {
        self.progress.list(user_id, page).await
    }
}
