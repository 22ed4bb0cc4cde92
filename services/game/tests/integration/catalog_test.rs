use qbm_domain::locale::Locale;

use qbm_game::domain::repository::{GameRepository, StageRepository};
use qbm_game::error::GameServiceError;
use qbm_game::usecase::game::{CreateGameInput, CreateGameUseCase, UpdateGameInput, UpdateGameUseCase};
use qbm_game::usecase::stage::DeleteStageUseCase;

use crate::helpers::World;

fn game_input(stage_id: uuid::Uuid, num_order: i32) -> CreateGameInput {
    CreateGameInput {
        stage_id,
        section_id: None,
        label: num_order.to_string(),
        image: None,
        num_order,
        locale: Locale::Fr,
    }
}

#[tokio::test]
async fn should_create_game_in_existing_stage() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);

    let usecase = CreateGameUseCase {
        games: world.game_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
    };
    let game = usecase.execute(game_input(stage.id, 1)).await.unwrap();
    assert_eq!(game.num_order, 1);
    assert_eq!(world.games.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_game_order_in_same_locale() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    world.add_game(&stage, None, 1);

    let usecase = CreateGameUseCase {
        games: world.game_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
    };
    let result = usecase.execute(game_input(stage.id, 1)).await;
    assert!(matches!(result, Err(GameServiceError::DuplicateOrder)));
}

#[tokio::test]
async fn should_allow_same_game_order_across_locales() {
    let world = World::new();
    let stage_fr = world.add_stage(Locale::Fr, 1);
    let stage_en = world.add_stage(Locale::En, 1);
    world.add_game(&stage_fr, None, 1);

    let usecase = CreateGameUseCase {
        games: world.game_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
    };
    let mut input = game_input(stage_en.id, 1);
    input.locale = Locale::En;
    assert!(usecase.execute(input).await.is_ok());
}

#[tokio::test]
async fn should_reject_game_for_missing_stage() {
    let world = World::new();
    let usecase = CreateGameUseCase {
        games: world.game_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
    };
    let result = usecase.execute(game_input(uuid::Uuid::now_v7(), 1)).await;
    assert!(matches!(result, Err(GameServiceError::StageNotFound)));
}

#[tokio::test]
async fn should_reject_game_for_missing_section() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let usecase = CreateGameUseCase {
        games: world.game_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
    };
    let mut input = game_input(stage.id, 1);
    input.section_id = Some(uuid::Uuid::now_v7());
    let result = usecase.execute(input).await;
    assert!(matches!(result, Err(GameServiceError::SectionNotFound)));
}

#[tokio::test]
async fn should_reject_update_onto_taken_order() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    world.add_game(&stage, None, 1);
    let game2 = world.add_game(&stage, None, 2);

    let usecase = UpdateGameUseCase {
        games: world.game_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
    };
    let result = usecase
        .execute(
            game2.id,
            UpdateGameInput {
                stage_id: stage.id,
                section_id: None,
                label: "2".into(),
                image: None,
                num_order: 1,
                locale: Locale::Fr,
            },
        )
        .await;
    assert!(matches!(result, Err(GameServiceError::DuplicateOrder)));
}

#[tokio::test]
async fn should_cascade_stage_delete_to_all_descendants() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let section = world.add_section(Locale::Fr, 1);
    let game1 = world.add_game(&stage, Some(&section), 1);
    let game2 = world.add_game(&stage, Some(&section), 2);
    world.add_question(&game1, Some(0));
    world.add_question(&game2, Some(1));
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let usecase = DeleteStageUseCase {
        repo: world.stage_repo(),
    };
    usecase.execute(stage.id).await.unwrap();

    // Post-delete queries return empty sets for every descendant.
    assert!(world.stage_repo().find(stage.id).await.unwrap().is_none());
    assert!(world.games.lock().unwrap().is_empty());
    assert!(world.questions.lock().unwrap().is_empty());
    assert!(world.entries.lock().unwrap().is_empty());
    assert!(
        world
            .game_repo()
            .questions_with_answers(game1.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn should_report_not_found_for_missing_stage_delete() {
    let world = World::new();
    let usecase = DeleteStageUseCase {
        repo: world.stage_repo(),
    };
    let result = usecase.execute(uuid::Uuid::now_v7()).await;
    assert!(matches!(result, Err(GameServiceError::StageNotFound)));
}
