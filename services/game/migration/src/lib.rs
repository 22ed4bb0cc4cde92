use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_stages;
mod m20260401_000003_create_stage_paragraphs;
mod m20260401_000004_create_sections;
mod m20260401_000005_create_games;
mod m20260401_000006_create_questions;
mod m20260401_000007_create_answers;
mod m20260401_000008_create_palmares;
mod m20260401_000009_add_progress_pointer;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_stages::Migration),
            Box::new(m20260401_000003_create_stage_paragraphs::Migration),
            Box::new(m20260401_000004_create_sections::Migration),
            Box::new(m20260401_000005_create_games::Migration),
            Box::new(m20260401_000006_create_questions::Migration),
            Box::new(m20260401_000007_create_answers::Migration),
            Box::new(m20260401_000008_create_palmares::Migration),
            Box::new(m20260401_000009_add_progress_pointer::Migration),
        ]
    }
}
