use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::pagination::PageRequest;
use qbm_domain::status::ProgressStatus;
use qbm_game_schema::{answers, games, questions, sections, stage_paragraphs, stages, users};

use crate::domain::repository::{
    GameRepository, QuestionRepository, SectionRepository, StageRepository, UserRepository,
};
use crate::domain::types::{
    Answer, Game, Question, QuestionWithAnswers, Section, Stage, StageParagraph, User,
};
use crate::error::GameServiceError;

// ── Model conversions ────────────────────────────────────────────────────────

pub(crate) fn parse_locale(s: &str) -> Result<Locale, GameServiceError> {
    Locale::parse(s)
        .ok_or_else(|| GameServiceError::Internal(anyhow::anyhow!("invalid locale in db: {s}")))
}

pub(crate) fn parse_status(s: &str) -> Result<ProgressStatus, GameServiceError> {
    ProgressStatus::parse(s)
        .ok_or_else(|| GameServiceError::Internal(anyhow::anyhow!("invalid status in db: {s}")))
}

fn stage_from_model(model: stages::Model) -> Result<Stage, GameServiceError> {
    Ok(Stage {
        id: model.id,
        title: model.title,
        label: model.label,
        image: model.image,
        num_order: model.num_order,
        locale: parse_locale(&model.locale)?,
        status: parse_status(&model.status)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn paragraph_from_model(model: stage_paragraphs::Model) -> StageParagraph {
    StageParagraph {
        id: model.id,
        stage_id: model.stage_id,
        body: model.body,
        position: model.position,
    }
}

fn section_from_model(model: sections::Model) -> Result<Section, GameServiceError> {
    Ok(Section {
        id: model.id,
        title: model.title,
        label: model.label,
        num_order: model.num_order,
        locale: parse_locale(&model.locale)?,
        status: parse_status(&model.status)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub(crate) fn game_from_model(model: games::Model) -> Result<Game, GameServiceError> {
    Ok(Game {
        id: model.id,
        stage_id: model.stage_id,
        section_id: model.section_id,
        label: model.label,
        image: model.image,
        num_order: model.num_order,
        locale: parse_locale(&model.locale)?,
        status: parse_status(&model.status)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn question_from_model(model: questions::Model) -> Result<Question, GameServiceError> {
    Ok(Question {
        id: model.id,
        game_id: model.game_id,
        body: model.body,
        locale: parse_locale(&model.locale)?,
        position: model.position,
    })
}

fn answer_from_model(model: answers::Model) -> Result<Answer, GameServiceError> {
    Ok(Answer {
        id: model.id,
        question_id: model.question_id,
        body: model.body,
        locale: parse_locale(&model.locale)?,
        is_correct: model.is_correct,
    })
}

fn user_from_model(model: users::Model) -> Result<User, GameServiceError> {
    let role = qbm_domain::role::UserRole::from_u8(model.role as u8)
        .ok_or_else(|| GameServiceError::Internal(anyhow::anyhow!("invalid role in db")))?;
    Ok(User {
        id: model.id,
        subject: model.subject,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        role,
        locale: parse_locale(&model.locale)?,
        country: model.country,
        phone: model.phone,
        current_entry_id: model.current_entry_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Stage repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStageRepository {
    pub db: DatabaseConnection,
}

impl StageRepository for DbStageRepository {
    async fn list(&self, locale: Option<Locale>) -> Result<Vec<Stage>, GameServiceError> {
        let mut query = stages::Entity::find().order_by_asc(stages::Column::NumOrder);
        if let Some(locale) = locale {
            query = query.filter(stages::Column::Locale.eq(locale.as_str()));
        }
        let models = query.all(&self.db).await.context("list stages")?;
        models.into_iter().map(stage_from_model).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Stage>, GameServiceError> {
        let model = stages::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find stage by id")?;
        model.map(stage_from_model).transpose()
    }

    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Stage>, GameServiceError> {
        let model = stages::Entity::find()
            .filter(stages::Column::Locale.eq(locale.as_str()))
            .filter(stages::Column::NumOrder.eq(num_order))
            .one(&self.db)
            .await
            .context("find stage by order")?;
        model.map(stage_from_model).transpose()
    }

    async fn first(&self, locale: Locale) -> Result<Option<Stage>, GameServiceError> {
        let model = stages::Entity::find()
            .filter(stages::Column::Locale.eq(locale.as_str()))
            .order_by_asc(stages::Column::NumOrder)
            .one(&self.db)
            .await
            .context("find first stage")?;
        model.map(stage_from_model).transpose()
    }

    async fn paragraphs(&self, stage_id: Uuid) -> Result<Vec<StageParagraph>, GameServiceError> {
        let models = stage_paragraphs::Entity::find()
            .filter(stage_paragraphs::Column::StageId.eq(stage_id))
            .order_by_asc(stage_paragraphs::Column::Position)
            .all(&self.db)
            .await
            .context("list stage paragraphs")?;
        Ok(models.into_iter().map(paragraph_from_model).collect())
    }

    async fn create(&self, stage: &Stage, paragraphs: &[String]) -> Result<(), GameServiceError> {
        let stage = stage.clone();
        let paragraphs = paragraphs.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    stages::ActiveModel {
                        id: Set(stage.id),
                        title: Set(stage.title.clone()),
                        label: Set(stage.label.clone()),
                        image: Set(stage.image.clone()),
                        num_order: Set(stage.num_order),
                        locale: Set(stage.locale.as_str().to_owned()),
                        status: Set(stage.status.as_str().to_owned()),
                        created_at: Set(stage.created_at),
                        updated_at: Set(stage.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    for (position, body) in paragraphs.iter().enumerate() {
                        stage_paragraphs::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            stage_id: Set(stage.id),
                            body: Set(body.clone()),
                            position: Set(position as i32),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create stage")?;
        Ok(())
    }

    async fn update(&self, stage: &Stage, paragraphs: &[String]) -> Result<(), GameServiceError> {
        let stage = stage.clone();
        let paragraphs = paragraphs.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    stages::ActiveModel {
                        id: Set(stage.id),
                        title: Set(stage.title.clone()),
                        label: Set(stage.label.clone()),
                        image: Set(stage.image.clone()),
                        num_order: Set(stage.num_order),
                        locale: Set(stage.locale.as_str().to_owned()),
                        status: Set(stage.status.as_str().to_owned()),
                        created_at: Set(stage.created_at),
                        updated_at: Set(stage.updated_at),
                    }
                    .update(txn)
                    .await?;

                    // Paragraph list is replaced wholesale.
                    stage_paragraphs::Entity::delete_many()
                        .filter(stage_paragraphs::Column::StageId.eq(stage.id))
                        .exec(txn)
                        .await?;
                    for (position, body) in paragraphs.iter().enumerate() {
                        stage_paragraphs::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            stage_id: Set(stage.id),
                            body: Set(body.clone()),
                            position: Set(position as i32),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update stage")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let result = stages::Entity::delete_many()
            .filter(stages::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete stage")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Section repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSectionRepository {
    pub db: DatabaseConnection,
}

impl SectionRepository for DbSectionRepository {
    async fn list(&self, locale: Option<Locale>) -> Result<Vec<Section>, GameServiceError> {
        let mut query = sections::Entity::find().order_by_asc(sections::Column::NumOrder);
        if let Some(locale) = locale {
            query = query.filter(sections::Column::Locale.eq(locale.as_str()));
        }
        let models = query.all(&self.db).await.context("list sections")?;
        models.into_iter().map(section_from_model).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Section>, GameServiceError> {
        let model = sections::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find section by id")?;
        model.map(section_from_model).transpose()
    }

    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Section>, GameServiceError> {
        let model = sections::Entity::find()
            .filter(sections::Column::Locale.eq(locale.as_str()))
            .filter(sections::Column::NumOrder.eq(num_order))
            .one(&self.db)
            .await
            .context("find section by order")?;
        model.map(section_from_model).transpose()
    }

    async fn first(&self, locale: Locale) -> Result<Option<Section>, GameServiceError> {
        let model = sections::Entity::find()
            .filter(sections::Column::Locale.eq(locale.as_str()))
            .order_by_asc(sections::Column::NumOrder)
            .one(&self.db)
            .await
            .context("find first section")?;
        model.map(section_from_model).transpose()
    }

    async fn create(&self, section: &Section) -> Result<(), GameServiceError> {
        sections::ActiveModel {
            id: Set(section.id),
            title: Set(section.title.clone()),
            label: Set(section.label.clone()),
            num_order: Set(section.num_order),
            locale: Set(section.locale.as_str().to_owned()),
            status: Set(section.status.as_str().to_owned()),
            created_at: Set(section.created_at),
            updated_at: Set(section.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create section")?;
        Ok(())
    }

    async fn update(&self, section: &Section) -> Result<(), GameServiceError> {
        sections::ActiveModel {
            id: Set(section.id),
            title: Set(section.title.clone()),
            label: Set(section.label.clone()),
            num_order: Set(section.num_order),
            locale: Set(section.locale.as_str().to_owned()),
            status: Set(section.status.as_str().to_owned()),
            created_at: Set(section.created_at),
            updated_at: Set(section.updated_at),
        }
        .update(&self.db)
        .await
        .context("update section")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let result = sections::Entity::delete_many()
            .filter(sections::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete section")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Game repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGameRepository {
    pub db: DatabaseConnection,
}

impl GameRepository for DbGameRepository {
    async fn list(
        &self,
        locale: Option<Locale>,
        stage_id: Option<Uuid>,
    ) -> Result<Vec<Game>, GameServiceError> {
        let mut query = games::Entity::find().order_by_asc(games::Column::NumOrder);
        if let Some(locale) = locale {
            query = query.filter(games::Column::Locale.eq(locale.as_str()));
        }
        if let Some(stage_id) = stage_id {
            query = query.filter(games::Column::StageId.eq(stage_id));
        }
        let models = query.all(&self.db).await.context("list games")?;
        models.into_iter().map(game_from_model).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Game>, GameServiceError> {
        let model = games::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find game by id")?;
        model.map(game_from_model).transpose()
    }

    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Game>, GameServiceError> {
        let model = games::Entity::find()
            .filter(games::Column::Locale.eq(locale.as_str()))
            .filter(games::Column::NumOrder.eq(num_order))
            .one(&self.db)
            .await
            .context("find game by order")?;
        model.map(game_from_model).transpose()
    }

    async fn first_in(
        &self,
        stage_id: Uuid,
        section_id: Option<Uuid>,
    ) -> Result<Option<Game>, GameServiceError> {
        let mut query = games::Entity::find()
            .filter(games::Column::StageId.eq(stage_id))
            .order_by_asc(games::Column::NumOrder);
        if let Some(section_id) = section_id {
            query = query.filter(games::Column::SectionId.eq(section_id));
        }
        let model = query.one(&self.db).await.context("find first game")?;
        model.map(game_from_model).transpose()
    }

    async fn questions_with_answers(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<QuestionWithAnswers>, GameServiceError> {
        let question_models = questions::Entity::find()
            .filter(questions::Column::GameId.eq(game_id))
            .order_by_asc(questions::Column::Position)
            .all(&self.db)
            .await
            .context("list game questions")?;

        let mut results = Vec::with_capacity(question_models.len());
        for model in question_models {
            let answer_models = answers::Entity::find()
                .filter(answers::Column::QuestionId.eq(model.id))
                .all(&self.db)
                .await
                .context("list question answers")?;
            let question = question_from_model(model)?;
            let answers = answer_models
                .into_iter()
                .map(answer_from_model)
                .collect::<Result<Vec<_>, _>>()?;
            results.push(QuestionWithAnswers { question, answers });
        }
        Ok(results)
    }

    async fn create(&self, game: &Game) -> Result<(), GameServiceError> {
        games::ActiveModel {
            id: Set(game.id),
            stage_id: Set(game.stage_id),
            section_id: Set(game.section_id),
            label: Set(game.label.clone()),
            image: Set(game.image.clone()),
            num_order: Set(game.num_order),
            locale: Set(game.locale.as_str().to_owned()),
            status: Set(game.status.as_str().to_owned()),
            created_at: Set(game.created_at),
            updated_at: Set(game.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create game")?;
        Ok(())
    }

    async fn update(&self, game: &Game) -> Result<(), GameServiceError> {
        games::ActiveModel {
            id: Set(game.id),
            stage_id: Set(game.stage_id),
            section_id: Set(game.section_id),
            label: Set(game.label.clone()),
            image: Set(game.image.clone()),
            num_order: Set(game.num_order),
            locale: Set(game.locale.as_str().to_owned()),
            status: Set(game.status.as_str().to_owned()),
            created_at: Set(game.created_at),
            updated_at: Set(game.updated_at),
        }
        .update(&self.db)
        .await
        .context("update game")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let result = games::Entity::delete_many()
            .filter(games::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete game")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Question repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbQuestionRepository {
    pub db: DatabaseConnection,
}

impl QuestionRepository for DbQuestionRepository {
    async fn list(
        &self,
        game_id: Option<Uuid>,
    ) -> Result<Vec<QuestionWithAnswers>, GameServiceError> {
        let mut query = questions::Entity::find().order_by_asc(questions::Column::Position);
        if let Some(game_id) = game_id {
            query = query.filter(questions::Column::GameId.eq(game_id));
        }
        let question_models = query.all(&self.db).await.context("list questions")?;

        let mut results = Vec::with_capacity(question_models.len());
        for model in question_models {
            let answer_models = answers::Entity::find()
                .filter(answers::Column::QuestionId.eq(model.id))
                .all(&self.db)
                .await
                .context("list question answers")?;
            let question = question_from_model(model)?;
            let answers = answer_models
                .into_iter()
                .map(answer_from_model)
                .collect::<Result<Vec<_>, _>>()?;
            results.push(QuestionWithAnswers { question, answers });
        }
        Ok(results)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Question>, GameServiceError> {
        let model = questions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find question by id")?;
        model.map(question_from_model).transpose()
    }

    async fn create(
        &self,
        question: &Question,
        initial_answers: &[Answer],
    ) -> Result<(), GameServiceError> {
        let question = question.clone();
        let initial_answers = initial_answers.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    questions::ActiveModel {
                        id: Set(question.id),
                        game_id: Set(question.game_id),
                        body: Set(question.body.clone()),
                        locale: Set(question.locale.as_str().to_owned()),
                        position: Set(question.position),
                    }
                    .insert(txn)
                    .await?;

                    for answer in &initial_answers {
                        answers::ActiveModel {
                            id: Set(answer.id),
                            question_id: Set(answer.question_id),
                            body: Set(answer.body.clone()),
                            locale: Set(answer.locale.as_str().to_owned()),
                            is_correct: Set(answer.is_correct),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create question")?;
        Ok(())
    }

    async fn update(&self, question: &Question) -> Result<(), GameServiceError> {
        questions::ActiveModel {
            id: Set(question.id),
            game_id: Set(question.game_id),
            body: Set(question.body.clone()),
            locale: Set(question.locale.as_str().to_owned()),
            position: Set(question.position),
        }
        .update(&self.db)
        .await
        .context("update question")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let result = questions::Entity::delete_many()
            .filter(questions::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete question")?;
        Ok(result.rows_affected > 0)
    }

    async fn answers_of(&self, question_id: Uuid) -> Result<Vec<Answer>, GameServiceError> {
        let models = answers::Entity::find()
            .filter(answers::Column::QuestionId.eq(question_id))
            .all(&self.db)
            .await
            .context("list answers")?;
        models.into_iter().map(answer_from_model).collect()
    }

    async fn find_answer(&self, id: Uuid) -> Result<Option<Answer>, GameServiceError> {
        let model = answers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find answer by id")?;
        model.map(answer_from_model).transpose()
    }

    async fn create_answer(&self, answer: &Answer) -> Result<(), GameServiceError> {
        answers::ActiveModel {
            id: Set(answer.id),
            question_id: Set(answer.question_id),
            body: Set(answer.body.clone()),
            locale: Set(answer.locale.as_str().to_owned()),
            is_correct: Set(answer.is_correct),
        }
        .insert(&self.db)
        .await
        .context("create answer")?;
        Ok(())
    }

    async fn update_answer(&self, answer: &Answer) -> Result<(), GameServiceError> {
        answers::ActiveModel {
            id: Set(answer.id),
            question_id: Set(answer.question_id),
            body: Set(answer.body.clone()),
            locale: Set(answer.locale.as_str().to_owned()),
            is_correct: Set(answer.is_correct),
        }
        .update(&self.db)
        .await
        .context("update answer")?;
        Ok(())
    }

    async fn delete_answer(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let result = answers::Entity::delete_many()
            .filter(answers::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete answer")?;
        Ok(result.rows_affected > 0)
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, GameServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, GameServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Subject.eq(subject))
            .one(&self.db)
            .await
            .context("find user by subject")?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, GameServiceError> {
        let page = page.clamped();
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &User) -> Result<(), GameServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            subject: Set(user.subject.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(user.role.as_u8() as i16),
            locale: Set(user.locale.as_str().to_owned()),
            country: Set(user.country.clone()),
            phone: Set(user.phone.clone()),
            current_entry_id: Set(user.current_entry_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), GameServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            subject: Set(user.subject.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(user.role.as_u8() as i16),
            locale: Set(user.locale.as_str().to_owned()),
            country: Set(user.country.clone()),
            phone: Set(user.phone.clone()),
            current_entry_id: Set(user.current_entry_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .update(&self.db)
        .await
        .context("update user")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}
