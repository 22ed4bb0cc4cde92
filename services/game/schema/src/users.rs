use sea_orm::entity::prelude::*;

/// Account record bridged from the external authentication provider.
///
/// `subject` is the provider's stable identifier; `current_entry_id` is the
/// per-user progress pointer into `palmares`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub subject: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: i16,
    pub locale: String,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub current_entry_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::palmares::Entity")]
    Palmares,
}

impl Related<super::palmares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Palmares.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
