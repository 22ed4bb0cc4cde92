use qbm_domain::locale::Locale;
use qbm_domain::status::ProgressStatus;

use qbm_game::domain::repository::ProgressRepository;
use qbm_game::domain::types::{AdvanceOutcome, AnswerSelection};
use qbm_game::error::GameServiceError;
use qbm_game::usecase::progress::{
    AdvanceProgressUseCase, GetCurrentGameUseCase, GetHistoryUseCase, GetProgressUseCase,
    ScoreCurrentGameUseCase,
};

use crate::helpers::World;

#[tokio::test]
async fn should_advance_to_next_game_and_create_current_entry() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let section = world.add_section(Locale::Fr, 1);
    let game1 = world.add_game(&stage, Some(&section), 1);
    let _game2 = world.add_game(&stage, Some(&section), 2);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let usecase = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    let output = usecase.execute(user.id, 2).await.unwrap();

    let AdvanceOutcome::Advanced(step) = output.outcome else {
        panic!("expected Advanced");
    };
    assert_eq!(step.game.num_order, 2);
    assert_eq!(step.stage.num_order, 1);

    let entries = world.entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    let finalized = &entries[0];
    assert!(finalized.is_finished);
    assert_eq!(finalized.score, 2);
    assert_eq!(finalized.status_game, ProgressStatus::Validated);
    // Same stage continues: only game/section close.
    assert_eq!(finalized.status_stage, ProgressStatus::Current);
    let current = &entries[1];
    assert!(!current.is_finished);
    assert_eq!(current.score, 0);
    assert_eq!(current.position, 2);
    assert_eq!(current.status_game, ProgressStatus::Current);
}

#[tokio::test]
async fn should_finish_when_catalog_is_exhausted() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let game1 = world.add_game(&stage, None, 1);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let usecase = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    let output = usecase.execute(user.id, 1).await.unwrap();

    assert!(matches!(output.outcome, AdvanceOutcome::Finished));
    assert!(!output.milestone);

    // Terminal: no new entry, the finalized one also closes its stage.
    let entries = world.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_finished);
    assert_eq!(entries[0].status_stage, ProgressStatus::Validated);
}

#[tokio::test]
async fn should_reject_second_advance_as_conflict() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let game1 = world.add_game(&stage, None, 1);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let usecase = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    usecase.execute(user.id, 1).await.unwrap();
    // The catalog is exhausted, so the pointer still targets the finalized
    // entry; a replayed submission must not finalize it twice.
    let result = usecase.execute(user.id, 1).await;
    assert!(matches!(result, Err(GameServiceError::AlreadyFinalized)));
    assert_eq!(world.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_validate_stage_on_rollover_to_next_stage() {
    let world = World::new();
    let stage1 = world.add_stage(Locale::Fr, 1);
    let stage2 = world.add_stage(Locale::Fr, 2);
    let game1 = world.add_game(&stage1, None, 1);
    let _game2 = world.add_game(&stage2, None, 2);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let usecase = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    let output = usecase.execute(user.id, 1).await.unwrap();

    let AdvanceOutcome::Advanced(step) = output.outcome else {
        panic!("expected Advanced");
    };
    assert_eq!(step.stage.num_order, 2);

    let entries = world.entries.lock().unwrap();
    assert_eq!(entries[0].status_stage, ProgressStatus::Validated);
    assert_eq!(entries[1].stage_order, 2);
}

#[tokio::test]
async fn should_flag_milestone_positions() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let game4 = world.add_game(&stage, None, 4);
    let _game5 = world.add_game(&stage, None, 5);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game4);

    let usecase = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    let output = usecase.execute(user.id, 1).await.unwrap();
    assert!(output.milestone);
}

#[tokio::test]
async fn should_stay_in_locale_when_advancing() {
    let world = World::new();
    let stage_fr = world.add_stage(Locale::Fr, 1);
    let stage_en = world.add_stage(Locale::En, 1);
    let game_fr1 = world.add_game(&stage_fr, None, 1);
    // The EN catalog has a game at order 2 but the FR one does not.
    let _game_en2 = world.add_game(&stage_en, None, 2);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game_fr1);

    let usecase = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    let output = usecase.execute(user.id, 1).await.unwrap();
    assert!(matches!(output.outcome, AdvanceOutcome::Finished));
}

#[tokio::test]
async fn should_report_no_current_entry_for_fresh_user() {
    let world = World::new();
    let user = world.add_player("user_abc");

    let usecase = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    let result = usecase.execute(user.id, 1).await;
    assert!(matches!(result, Err(GameServiceError::NoCurrentEntry)));
}

#[tokio::test]
async fn should_score_and_advance_through_submission_flow() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let game1 = world.add_game(&stage, None, 1);
    let _game2 = world.add_game(&stage, None, 2);
    let q1 = world.add_question(&game1, Some(0));
    let q2 = world.add_question(&game1, None); // no correct answer
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let scorer = ScoreCurrentGameUseCase {
        progress: world.progress_repo(),
        games: world.game_repo(),
    };
    let selections = [
        AnswerSelection {
            question_id: q1.question.id,
            answer_id: q1.answers[0].id,
        },
        AnswerSelection {
            question_id: q2.question.id,
            answer_id: q2.answers[1].id,
        },
    ];
    let summary = scorer.execute(user.id, &selections).await.unwrap();
    // The unanswerable question never awards its point.
    assert_eq!(summary.score, 1);
    assert_eq!(summary.total, 2);

    let advancer = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    let output = advancer.execute(user.id, summary.score).await.unwrap();
    assert!(matches!(output.outcome, AdvanceOutcome::Advanced(_)));

    let entries = world.entries.lock().unwrap();
    assert_eq!(entries[0].score, 1);
}

#[tokio::test]
async fn should_expose_current_progress_with_catalog_context() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let section = world.add_section(Locale::Fr, 1);
    let game1 = world.add_game(&stage, Some(&section), 1);
    world.add_question(&game1, Some(2));
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let usecase = GetProgressUseCase {
        progress: world.progress_repo(),
        stages: world.stage_repo(),
        sections: world.section_repo(),
        games: world.game_repo(),
    };
    let progress = usecase.execute(user.id).await.unwrap();
    assert_eq!(progress.stage.id, stage.id);
    assert_eq!(progress.section.as_ref().map(|s| s.id), Some(section.id));
    assert_eq!(progress.game.id, game1.id);
    assert_eq!(progress.entry.game_order, 1);
}

#[tokio::test]
async fn should_expose_current_game_with_questions() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let game1 = world.add_game(&stage, None, 1);
    world.add_question(&game1, Some(0));
    world.add_question(&game1, Some(1));
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let usecase = GetCurrentGameUseCase {
        progress: world.progress_repo(),
        games: world.game_repo(),
    };
    let (entry, game, questions) = usecase.execute(user.id).await.unwrap();
    assert_eq!(entry.game_id, game1.id);
    assert_eq!(game.id, game1.id);
    assert_eq!(questions.len(), 2);
}

#[tokio::test]
async fn should_list_history_newest_first() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let game1 = world.add_game(&stage, None, 1);
    let _game2 = world.add_game(&stage, None, 2);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let advancer = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    advancer.execute(user.id, 1).await.unwrap();

    let usecase = GetHistoryUseCase {
        progress: world.progress_repo(),
    };
    let history = usecase
        .execute(user.id, qbm_domain::pagination::PageRequest::default())
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].position, 2);
    assert!(!history[0].is_finished);
    assert!(history[1].is_finished);
}

#[tokio::test]
async fn should_leave_no_current_entry_after_finishing() {
    let world = World::new();
    let stage = world.add_stage(Locale::Fr, 1);
    let game1 = world.add_game(&stage, None, 1);
    let user = world.add_player("user_abc");
    world.seed_entry(&user, &game1);

    let advancer = AdvanceProgressUseCase {
        progress: world.progress_repo(),
    };
    advancer.execute(user.id, 1).await.unwrap();

    let current = world.progress_repo().find_current(user.id).await.unwrap();
    assert!(current.is_none());
}
