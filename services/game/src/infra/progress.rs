use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionError, TransactionTrait,
    sea_query::Expr,
};
use uuid::Uuid;

use qbm_domain::pagination::PageRequest;
use qbm_domain::status::ProgressStatus;
use qbm_game_schema::{games, palmares, sections, stages, users};

use crate::domain::repository::ProgressRepository;
use crate::domain::types::{AdvanceOutcome, GameRef, LedgerEntry, NextStep, SectionRef, StageRef};
use crate::error::GameServiceError;

use super::db::{parse_locale, parse_status};

fn entry_from_model(model: palmares::Model) -> Result<LedgerEntry, GameServiceError> {
    Ok(LedgerEntry {
        id: model.id,
        user_id: model.user_id,
        stage_id: model.stage_id,
        section_id: model.section_id,
        game_id: model.game_id,
        stage_label: model.stage_label,
        section_label: model.section_label,
        game_label: model.game_label,
        stage_order: model.stage_order,
        section_order: model.section_order,
        game_order: model.game_order,
        position: model.position,
        locale: parse_locale(&model.locale)?,
        score: model.score,
        is_finished: model.is_finished,
        status_stage: parse_status(&model.status_stage)?,
        status_section: parse_status(&model.status_section)?,
        status_game: parse_status(&model.status_game)?,
        created_at: model.created_at,
    })
}

fn unwrap_txn_error(e: TransactionError<GameServiceError>) -> GameServiceError {
    match e {
        TransactionError::Connection(db_err) => {
            GameServiceError::Internal(anyhow::Error::new(db_err).context("transaction"))
        }
        TransactionError::Transaction(inner) => inner,
    }
}

#[derive(Clone)]
pub struct DbProgressRepository {
    pub db: DatabaseConnection,
}

impl ProgressRepository for DbProgressRepository {
    async fn find_current(&self, user_id: Uuid) -> Result<Option<LedgerEntry>, GameServiceError> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("load user for current entry")?;
        let Some(pointer) = user.and_then(|u| u.current_entry_id) else {
            return Ok(None);
        };
        let model = palmares::Entity::find_by_id(pointer)
            .one(&self.db)
            .await
            .context("load current entry")?;
        match model {
            Some(m) if m.status_game == ProgressStatus::Current.as_str() => {
                Ok(Some(entry_from_model(m)?))
            }
            _ => Ok(None),
        }
    }

    async fn has_any(&self, user_id: Uuid) -> Result<bool, GameServiceError> {
        let count = palmares::Entity::find()
            .filter(palmares::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count ledger entries")?;
        Ok(count > 0)
    }

    async fn list(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, GameServiceError> {
        let page = page.clamped();
        let models = palmares::Entity::find()
            .filter(palmares::Column::UserId.eq(user_id))
            .order_by_desc(palmares::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list ledger entries")?;
        models.into_iter().map(entry_from_model).collect()
    }

    async fn create_initial(&self, entry: &LedgerEntry) -> Result<(), GameServiceError> {
        let entry = entry.clone();
        self.db
            .transaction::<_, (), GameServiceError>(|txn| {
                Box::pin(async move {
                    let user = users::Entity::find_by_id(entry.user_id)
                        .one(txn)
                        .await
                        .context("load user for initial entry")?
                        .ok_or(GameServiceError::UserNotFound)?;

                    insert_entry(txn, &entry).await?;

                    let mut user_update: users::ActiveModel = users::ActiveModel {
                        id: Set(user.id),
                        ..Default::default()
                    };
                    user_update.current_entry_id = Set(Some(entry.id));
                    user_update.updated_at = Set(chrono::Utc::now());
                    user_update
                        .update(txn)
                        .await
                        .context("set progress pointer")?;
                    Ok(())
                })
            })
            .await
            .map_err(unwrap_txn_error)
    }

    async fn advance_current(
        &self,
        user_id: Uuid,
        score: i32,
    ) -> Result<AdvanceOutcome, GameServiceError> {
        self.db
            .transaction::<_, AdvanceOutcome, GameServiceError>(move |txn| {
                Box::pin(async move {
                    let user = users::Entity::find_by_id(user_id)
                        .one(txn)
                        .await
                        .context("load user for advance")?
                        .ok_or(GameServiceError::UserNotFound)?;
                    let pointer = user.current_entry_id.ok_or(GameServiceError::NoCurrentEntry)?;
                    let entry = palmares::Entity::find_by_id(pointer)
                        .one(txn)
                        .await
                        .context("load current entry for advance")?
                        .ok_or(GameServiceError::NoCurrentEntry)?;

                    // The successor decides whether the finalized entry also
                    // closes its stage.
                    let next_game = games::Entity::find()
                        .filter(games::Column::Locale.eq(entry.locale.clone()))
                        .filter(games::Column::NumOrder.eq(entry.game_order + 1))
                        .one(txn)
                        .await
                        .context("find next game")?;
                    let stage_done = match &next_game {
                        None => true,
                        Some(game) => game.stage_id != entry.stage_id,
                    };

                    // Guarded finalize: a concurrent advance or a double
                    // submission already flipped is_finished and matches
                    // nothing here.
                    let mut finalize = palmares::Entity::update_many()
                        .col_expr(palmares::Column::Score, Expr::value(score))
                        .col_expr(palmares::Column::IsFinished, Expr::value(true))
                        .col_expr(
                            palmares::Column::StatusGame,
                            Expr::value(ProgressStatus::Validated.as_str()),
                        )
                        .col_expr(
                            palmares::Column::StatusSection,
                            Expr::value(ProgressStatus::Validated.as_str()),
                        );
                    if stage_done {
                        finalize = finalize.col_expr(
                            palmares::Column::StatusStage,
                            Expr::value(ProgressStatus::Validated.as_str()),
                        );
                    }
                    let finalized = finalize
                        .filter(palmares::Column::Id.eq(entry.id))
                        .filter(palmares::Column::IsFinished.eq(false))
                        .exec(txn)
                        .await
                        .context("finalize current entry")?;
                    if finalized.rows_affected == 0 {
                        return Err(GameServiceError::AlreadyFinalized);
                    }

                    let Some(next_game) = next_game else {
                        // Catalog exhausted. The pointer stays on the
                        // finalized row; find_current reports none from here.
                        return Ok(AdvanceOutcome::Finished);
                    };

                    let stage = stages::Entity::find_by_id(next_game.stage_id)
                        .one(txn)
                        .await
                        .context("load next stage")?
                        .ok_or(GameServiceError::StageNotFound)?;
                    let section = match next_game.section_id {
                        Some(section_id) => sections::Entity::find_by_id(section_id)
                            .one(txn)
                            .await
                            .context("load next section")?,
                        None => None,
                    };

                    let next_entry = palmares::Model {
                        id: Uuid::now_v7(),
                        user_id,
                        stage_id: stage.id,
                        section_id: next_game.section_id,
                        game_id: next_game.id,
                        stage_label: stage.label.clone(),
                        section_label: section.as_ref().map(|s| s.label.clone()),
                        game_label: next_game.label.clone(),
                        stage_order: stage.num_order,
                        section_order: section.as_ref().map(|s| s.num_order),
                        game_order: next_game.num_order,
                        position: entry.position + 1,
                        locale: entry.locale.clone(),
                        score: 0,
                        is_finished: false,
                        status_stage: ProgressStatus::Current.as_str().to_owned(),
                        status_section: ProgressStatus::Current.as_str().to_owned(),
                        status_game: ProgressStatus::Current.as_str().to_owned(),
                        created_at: chrono::Utc::now(),
                    };
                    insert_model(txn, &next_entry).await?;

                    let mut user_update: users::ActiveModel = users::ActiveModel {
                        id: Set(user_id),
                        ..Default::default()
                    };
                    user_update.current_entry_id = Set(Some(next_entry.id));
                    user_update.updated_at = Set(chrono::Utc::now());
                    user_update
                        .update(txn)
                        .await
                        .context("move progress pointer")?;

                    Ok(AdvanceOutcome::Advanced(NextStep {
                        entry_id: next_entry.id,
                        stage: StageRef {
                            id: stage.id,
                            title: stage.title,
                            label: stage.label,
                            num_order: stage.num_order,
                        },
                        section: section.map(|s| SectionRef {
                            id: s.id,
                            title: s.title,
                            label: s.label,
                            num_order: s.num_order,
                        }),
                        game: GameRef {
                            id: next_game.id,
                            label: next_game.label,
                            num_order: next_game.num_order,
                        },
                    }))
                })
            })
            .await
            .map_err(unwrap_txn_error)
    }
}

async fn insert_entry<C: sea_orm::ConnectionTrait>(
    conn: &C,
    entry: &LedgerEntry,
) -> Result<(), GameServiceError> {
    palmares::ActiveModel {
        id: Set(entry.id),
        user_id: Set(entry.user_id),
        stage_id: Set(entry.stage_id),
        section_id: Set(entry.section_id),
        game_id: Set(entry.game_id),
        stage_label: Set(entry.stage_label.clone()),
        section_label: Set(entry.section_label.clone()),
        game_label: Set(entry.game_label.clone()),
        stage_order: Set(entry.stage_order),
        section_order: Set(entry.section_order),
        game_order: Set(entry.game_order),
        position: Set(entry.position),
        locale: Set(entry.locale.as_str().to_owned()),
        score: Set(entry.score),
        is_finished: Set(entry.is_finished),
        status_stage: Set(entry.status_stage.as_str().to_owned()),
        status_section: Set(entry.status_section.as_str().to_owned()),
        status_game: Set(entry.status_game.as_str().to_owned()),
        created_at: Set(entry.created_at),
    }
    .insert(conn)
    .await
    .context("insert ledger entry")?;
    Ok(())
}

async fn insert_model<C: sea_orm::ConnectionTrait>(
    conn: &C,
    model: &palmares::Model,
) -> Result<(), GameServiceError> {
    palmares::ActiveModel {
        id: Set(model.id),
        user_id: Set(model.user_id),
        stage_id: Set(model.stage_id),
        section_id: Set(model.section_id),
        game_id: Set(model.game_id),
        stage_label: Set(model.stage_label.clone()),
        section_label: Set(model.section_label.clone()),
        game_label: Set(model.game_label.clone()),
        stage_order: Set(model.stage_order),
        section_order: Set(model.section_order),
        game_order: Set(model.game_order),
        position: Set(model.position),
        locale: Set(model.locale.clone()),
        score: Set(model.score),
        is_finished: Set(model.is_finished),
        status_stage: Set(model.status_stage.clone()),
        status_section: Set(model.status_section.clone()),
        status_game: Set(model.status_game.clone()),
        created_at: Set(model.created_at),
    }
    .insert(conn)
    .await
    .context("insert next ledger entry")?;
    Ok(())
}
