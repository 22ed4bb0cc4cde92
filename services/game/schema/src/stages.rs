use sea_orm::entity::prelude::*;

/// Top-level catalog unit (a themed level).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub label: String,
    pub image: String,
    pub num_order: i32,
    pub locale: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stage_paragraphs::Entity")]
    StageParagraphs,
    #[sea_orm(has_many = "super::games::Entity")]
    Games,
    #[sea_orm(has_many = "super::palmares::Entity")]
    Palmares,
}

impl Related<super::stage_paragraphs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StageParagraphs.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Games.def()
    }
}

impl Related<super::palmares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Palmares.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
