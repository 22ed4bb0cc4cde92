use uuid::Uuid;

use qbm_domain::locale::Locale;

use crate::domain::repository::{GameRepository, QuestionRepository};
use crate::domain::types::{Answer, Question, QuestionWithAnswers};
use crate::error::GameServiceError;

// ── CreateQuestion ───────────────────────────────────────────────────────────

pub struct NewAnswer {
    pub body: String,
    pub locale: Option<Locale>,
    pub is_correct: bool,
}

pub struct CreateQuestionInput {
    pub game_id: Uuid,
    pub body: String,
    pub locale: Locale,
    pub position: i32,
    pub answers: Vec<NewAnswer>,
}

pub struct CreateQuestionUseCase<Q: QuestionRepository, G: GameRepository> {
    pub questions: Q,
    pub games: G,
}

impl<Q: QuestionRepository, G: GameRepository> CreateQuestionUseCase<Q, G> {
    pub async fn execute(
        &self,
        input: CreateQuestionInput,
    ) -> Result<QuestionWithAnswers, GameServiceError> {
        if input.body.trim().is_empty() {
            return Err(GameServiceError::validation("body is required"));
        }
        if self.games.find(input.game_id).await?.is_none() {
            return Err(GameServiceError::GameNotFound);
        }

        let question = Question {
            id: Uuid::now_v7(),
            game_id: input.game_id,
            body: input.body,
            locale: input.locale,
            position: input.position,
        };
        let answers: Vec<Answer> = input
            .answers
            .into_iter()
            .map(|a| Answer {
                id: Uuid::now_v7(),
                question_id: question.id,
                body: a.body,
                locale: a.locale.unwrap_or(input.locale),
                is_correct: a.is_correct,
            })
            .collect();

        self.questions.create(&question, &answers).await?;
        Ok(QuestionWithAnswers { question, answers })
    }
}

// ── UpdateQuestion ───────────────────────────────────────────────────────────

pub struct UpdateQuestionInput {
    pub game_id: Uuid,
    pub body: String,
    pub locale: Locale,
    pub position: i32,
}

pub struct UpdateQuestionUseCase<Q: QuestionRepository, G: GameRepository> {
    pub questions: Q,
    pub games: G,
}

impl<Q: QuestionRepository, G: GameRepository> UpdateQuestionUseCase<Q, G> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateQuestionInput,
    ) -> Result<Question, GameServiceError> {
        if self.questions.find(id).await?.is_none() {
            return Err(GameServiceError::QuestionNotFound);
        }
        if input.body.trim().is_empty() {
            return Err(GameServiceError::validation("body is required"));
        }
        if self.games.find(input.game_id).await?.is_none() {
            return Err(GameServiceError::GameNotFound);
        }

        let question = Question {
            id,
            game_id: input.game_id,
            body: input.body,
            locale: input.locale,
            position: input.position,
        };
        self.questions.update(&question).await?;
        Ok(question)
    }
}

// ── ListQuestions / DeleteQuestion ───────────────────────────────────────────

pub struct ListQuestionsUseCase<Q: QuestionRepository> {
    pub questions: Q,
}

impl<Q: QuestionRepository> ListQuestionsUseCase<Q> {
    pub async fn execute(
        &self,
        game_id: Option<Uuid>,
    ) -> Result<Vec<QuestionWithAnswers>, GameServiceError> {
        self.questions.list(game_id).await
    }
}

pub struct DeleteQuestionUseCase<Q: QuestionRepository> {
    pub questions: Q,
}

impl<Q: QuestionRepository> DeleteQuestionUseCase<Q> {
    pub async fn execute(&self, id: Uuid) -> Result<(), GameServiceError> {
        let deleted = self.questions.delete(id).await?;
        if !deleted {
            return Err(GameServiceError::QuestionNotFound);
        }
        Ok(())
    }
}

// ── Answers ──────────────────────────────────────────────────────────────────

pub struct ListAnswersUseCase<Q: QuestionRepository> {
    pub questions: Q,
}

impl<Q: QuestionRepository> ListAnswersUseCase<Q> {
    pub async fn execute(&self, question_id: Uuid) -> Result<Vec<Answer>, GameServiceError> {
        if self.questions.find(question_id).await?.is_none() {
            return Err(GameServiceError::QuestionNotFound);
        }
        self.questions.answers_of(question_id).await
    }
}

pub struct CreateAnswerInput {
    pub question_id: Uuid,
    pub body: String,
    pub locale: Option<Locale>,
    pub is_correct: bool,
}

pub struct CreateAnswerUseCase<Q: QuestionRepository> {
    pub questions: Q,
}

impl<Q: QuestionRepository> CreateAnswerUseCase<Q> {
    pub async fn execute(&self, input: CreateAnswerInput) -> Result<Answer, GameServiceError> {
        if input.body.trim().is_empty() {
            return Err(GameServiceError::validation("body is required"));
        }
        let question = self
            .questions
            .find(input.question_id)
            .await?
            .ok_or(GameServiceError::QuestionNotFound)?;

        let answer = Answer {
            id: Uuid::now_v7(),
            question_id: question.id,
            body: input.body,
            locale: input.locale.unwrap_or(question.locale),
            is_correct: input.is_correct,
        };
        self.questions.create_answer(&answer).await?;
        Ok(answer)
    }
}

pub struct UpdateAnswerInput {
    pub body: String,
    pub locale: Locale,
    pub is_correct: bool,
}

pub struct UpdateAnswerUseCase<Q: QuestionRepository> {
    pub questions: Q,
}

impl<Q: QuestionRepository> UpdateAnswerUseCase<Q> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateAnswerInput,
    ) -> Result<Answer, GameServiceError> {
        let existing = self
            .questions
            .find_answer(id)
            .await?
            .ok_or(GameServiceError::AnswerNotFound)?;
        if input.body.trim().is_empty() {
            return Err(GameServiceError::validation("body is required"));
        }

        let answer = Answer {
            id,
            question_id: existing.question_id,
            body: input.body,
            locale: input.locale,
            is_correct: input.is_correct,
        };
        self.questions.update_answer(&answer).await?;
        Ok(answer)
    }
}

pub struct DeleteAnswerUseCase<Q: QuestionRepository> {
    pub questions: Q,
}

impl<Q: QuestionRepository> DeleteAnswerUseCase<Q> {
    pub async fn execute(&self, id: Uuid) -> Result<(), GameServiceError> {
        let deleted = self.questions.delete_answer(id).await?;
        if !deleted {
            return Err(GameServiceError::AnswerNotFound);
        }
        Ok(())
    }
}
