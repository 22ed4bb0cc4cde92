use sea_orm::entity::prelude::*;

/// One per-attempt progress ledger row.
///
/// Labels and numeric orders of the referenced stage/section/game are
/// copied in at creation time so the history stays readable after catalog
/// edits. `position` is the 1-based per-user attempt counter.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "palmares")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub locale: String,
    pub score: i32,
    pub is_finished: bool,
    pub status_stage: String,
    pub status_section: String,
    pub status_game: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::stages::Entity",
        from = "Column::StageId",
        to = "super::stages::Column::Id"
    )]
    Stage,
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::stages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stage.def()
    }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
