use qbm_domain::locale::Locale;
use qbm_domain::role::UserRole;
use qbm_domain::status::ProgressStatus;

use qbm_game::error::GameServiceError;
use qbm_game::usecase::onboarding::{OnboardInput, OnboardUserUseCase};

use crate::helpers::World;

fn onboard_input() -> OnboardInput {
    OnboardInput {
        email: "alice@example.com".into(),
        first_name: "Alice".into(),
        last_name: "Martin".into(),
        role: None,
        locale: None,
        country: Some("FR".into()),
        phone: None,
    }
}

fn usecase(
    world: &World,
) -> OnboardUserUseCase<
    crate::helpers::InMemoryUserRepo,
    crate::helpers::InMemoryStageRepo,
    crate::helpers::InMemorySectionRepo,
    crate::helpers::InMemoryGameRepo,
    crate::helpers::InMemoryProgressRepo,
> {
    OnboardUserUseCase {
        users: world.user_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
        games: world.game_repo(),
        progress: world.progress_repo(),
    }
}

#[tokio::test]
async fn should_create_user_and_first_entry_once() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let section = world.add_section(Locale::Fr, 1);
    world.add_game(&stage, Some(&section), 1);

    let uc = usecase(&world);
    let first = uc
        .execute("user_abc", Locale::Fr, onboard_input())
        .await
        .unwrap();
    assert!(first.created);
    assert!(first.seeded);

    // Invoking onboarding again must not duplicate anything.
    let second = uc
        .execute("user_abc", Locale::Fr, onboard_input())
        .await
        .unwrap();
    assert!(!second.created);
    assert!(!second.seeded);

    assert_eq!(world.users.lock().unwrap().len(), 1);
    let entries = world.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].position, 1);
    assert_eq!(entries[0].status_game, ProgressStatus::Current);
    assert_eq!(entries[0].section_label.as_deref(), Some("1"));
}

#[tokio::test]
async fn should_seed_in_the_users_locale() {
    let world = World::new();
    let stage_fr = world.add_stage(Locale::Fr, 1);
    world.add_game(&stage_fr, None, 1);
    let stage_es = world.add_stage(Locale::Es, 1);
    world.add_game(&stage_es, None, 1);

    let uc = usecase(&world);
    let mut input = onboard_input();
    input.locale = Some(Locale::Es);
    let output = uc.execute("user_es", Locale::Fr, input).await.unwrap();

    assert_eq!(output.user.locale, Locale::Es);
    let entries = world.entries.lock().unwrap();
    assert_eq!(entries[0].stage_id, stage_es.id);
    assert_eq!(entries[0].locale, Locale::Es);
}

#[tokio::test]
async fn should_fall_back_to_identity_locale() {
    let world = World::new();
    let stage = world.add_stage(Locale::De, 1);
    world.add_game(&stage, None, 1);

    let uc = usecase(&world);
    let output = uc
        .execute("user_de", Locale::De, onboard_input())
        .await
        .unwrap();
    assert_eq!(output.user.locale, Locale::De);
}

#[tokio::test]
async fn should_create_manager_without_ledger() {
    let world = World::new();

    let uc = usecase(&world);
    let mut input = onboard_input();
    input.role = Some(UserRole::Manager);
    let output = uc.execute("user_mgr", Locale::Fr, input).await.unwrap();

    assert!(output.created);
    assert!(!output.seeded);
    assert_eq!(output.user.role, UserRole::Manager);
    assert!(world.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_seed_ledger_when_catalog_incomplete() {
    let world = World::new();
    world.add_stage(Locale::Fr, 1); // stage exists, but has no games

    let uc = usecase(&world);
    let result = uc.execute("user_abc", Locale::Fr, onboard_input()).await;
    assert!(matches!(result, Err(GameServiceError::GameNotFound)));
    // The account bridge happened, the ledger seed did not.
    assert_eq!(world.users.lock().unwrap().len(), 1);
    assert!(world.entries.lock().unwrap().is_empty());
}
