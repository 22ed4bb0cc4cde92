//! In-memory repository implementations sharing one catalog/ledger world.
//!
//! They honor the same contracts as the database-backed repositories
//! (locale-scoped ordering, pointer semantics, guarded finalization,
//! cascading stage deletes) so usecase flows can be exercised end to end
//! without a database.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use qbm_domain::locale::Locale;
use qbm_domain::pagination::PageRequest;
use qbm_domain::role::UserRole;
use qbm_domain::status::ProgressStatus;
use qbm_testing::fixture::{fixed_time, uuid_n};

use qbm_game::domain::repository::{
    GameRepository, ProgressRepository, SectionRepository, StageRepository, UserRepository,
};
use qbm_game::domain::types::{
    AdvanceOutcome, Answer, Game, GameRef, LedgerEntry, NextStep, Question, QuestionWithAnswers,
    Section, SectionRef, Stage, StageParagraph, StageRef, User,
};
use qbm_game::error::GameServiceError;

/// Shared mutable world behind all in-memory repositories.
#[derive(Default)]
pub struct World {
    pub stages: Arc<Mutex<Vec<Stage>>>,
    pub sections: Arc<Mutex<Vec<Section>>>,
    pub games: Arc<Mutex<Vec<Game>>>,
    pub questions: Arc<Mutex<Vec<QuestionWithAnswers>>>,
    pub users: Arc<Mutex<Vec<User>>>,
    pub entries: Arc<Mutex<Vec<LedgerEntry>>>,
    /// Per-user progress pointer: (user_id, entry_id).
    pub pointers: Arc<Mutex<Vec<(Uuid, Uuid)>>>,
    next_id: Arc<Mutex<u32>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&self) -> Uuid {
        let mut counter = self.next_id.lock().unwrap();
        *counter += 1;
        uuid_n(*counter)
    }

    pub fn add_stage(&self, locale: Locale, num_order: i32) -> Stage {
        let stage = Stage {
            id: self.fresh_id(),
            title: format!("Stage {num_order}"),
            label: num_order.to_string(),
            image: "https://img.example/stage.jpg".into(),
            num_order,
            locale,
            status: ProgressStatus::New,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        self.stages.lock().unwrap().push(stage.clone());
        stage
    }

    pub fn add_section(&self, locale: Locale, num_order: i32) -> Section {
        let section = Section {
            id: self.fresh_id(),
            title: format!("Section {num_order}"),
            label: num_order.to_string(),
            num_order,
            locale,
            status: ProgressStatus::New,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        self.sections.lock().unwrap().push(section.clone());
        section
    }

    pub fn add_game(&self, stage: &Stage, section: Option<&Section>, num_order: i32) -> Game {
        let game = Game {
            id: self.fresh_id(),
            stage_id: stage.id,
            section_id: section.map(|s| s.id),
            label: num_order.to_string(),
            image: None,
            num_order,
            locale: stage.locale,
            status: ProgressStatus::New,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        self.games.lock().unwrap().push(game.clone());
        game
    }

    /// Three-answer question; `correct_answer` picks which answer is marked
    /// correct (`None` yields a question no selection can score on).
    pub fn add_question(&self, game: &Game, correct_answer: Option<usize>) -> QuestionWithAnswers {
        let question = Question {
            id: self.fresh_id(),
            game_id: game.id,
            body: "Question".into(),
            locale: game.locale,
            position: self.questions.lock().unwrap().len() as i32,
        };
        let answers = (0..3)
            .map(|idx| Answer {
                id: self.fresh_id(),
                question_id: question.id,
                body: format!("Réponse {idx}"),
                locale: game.locale,
                is_correct: Some(idx) == correct_answer,
            })
            .collect::<Vec<_>>();
        let tree = QuestionWithAnswers { question, answers };
        self.questions.lock().unwrap().push(tree.clone());
        tree
    }

    pub fn add_player(&self, subject: &str) -> User {
        let user = User {
            id: self.fresh_id(),
            subject: subject.to_owned(),
            email: format!("{subject}@example.com"),
            first_name: "Alice".into(),
            last_name: "Martin".into(),
            role: UserRole::Player,
            locale: Locale::Fr,
            country: None,
            phone: None,
            current_entry_id: None,
            created_at: fixed_time(),
            updated_at: fixed_time(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Seed a CURRENT entry for `user` at `game` and point the user at it.
    pub fn seed_entry(&self, user: &User, game: &Game) -> LedgerEntry {
        let stages = self.stages.lock().unwrap();
        let stage = stages.iter().find(|s| s.id == game.stage_id).unwrap();
        let sections = self.sections.lock().unwrap();
        let section = game
            .section_id
            .and_then(|id| sections.iter().find(|s| s.id == id));
        let entry = LedgerEntry {
            id: self.fresh_id(),
            user_id: user.id,
            stage_id: stage.id,
            section_id: game.section_id,
            game_id: game.id,
            stage_label: stage.label.clone(),
            section_label: section.map(|s| s.label.clone()),
            game_label: game.label.clone(),
            stage_order: stage.num_order,
            section_order: section.map(|s| s.num_order),
            game_order: game.num_order,
            position: self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user.id)
                .count() as i32
                + 1,
            locale: game.locale,
            score: 0,
            is_finished: false,
            status_stage: ProgressStatus::Current,
            status_section: ProgressStatus::Current,
            status_game: ProgressStatus::Current,
            created_at: Utc::now(),
        };
        self.entries.lock().unwrap().push(entry.clone());
        self.set_pointer(user.id, Some(entry.id));
        entry
    }

    fn set_pointer(&self, user_id: Uuid, entry_id: Option<Uuid>) {
        let mut pointers = self.pointers.lock().unwrap();
        pointers.retain(|(uid, _)| *uid != user_id);
        if let Some(entry_id) = entry_id {
            pointers.push((user_id, entry_id));
        }
    }

    fn pointer(&self, user_id: Uuid) -> Option<Uuid> {
        self.pointers
            .lock()
            .unwrap()
            .iter()
            .find(|(uid, _)| *uid == user_id)
            .map(|(_, eid)| *eid)
    }

    pub fn stage_repo(&self) -> InMemoryStageRepo {
        InMemoryStageRepo {
            stages: Arc::clone(&self.stages),
            games: Arc::clone(&self.games),
            questions: Arc::clone(&self.questions),
            entries: Arc::clone(&self.entries),
        }
    }

    pub fn section_repo(&self) -> InMemorySectionRepo {
        InMemorySectionRepo {
            sections: Arc::clone(&self.sections),
        }
    }

    pub fn game_repo(&self) -> InMemoryGameRepo {
        InMemoryGameRepo {
            games: Arc::clone(&self.games),
            questions: Arc::clone(&self.questions),
        }
    }

    pub fn user_repo(&self) -> InMemoryUserRepo {
        InMemoryUserRepo {
            users: Arc::clone(&self.users),
        }
    }

    pub fn progress_repo(&self) -> InMemoryProgressRepo {
        InMemoryProgressRepo {
            world: WorldHandles {
                stages: Arc::clone(&self.stages),
                sections: Arc::clone(&self.sections),
                games: Arc::clone(&self.games),
                entries: Arc::clone(&self.entries),
                pointers: Arc::clone(&self.pointers),
            },
        }
    }
}

// ── Stage repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryStageRepo {
    stages: Arc<Mutex<Vec<Stage>>>,
    games: Arc<Mutex<Vec<Game>>>,
    questions: Arc<Mutex<Vec<QuestionWithAnswers>>>,
    entries: Arc<Mutex<Vec<LedgerEntry>>>,
}

impl StageRepository for InMemoryStageRepo {
    async fn list(&self, locale: Option<Locale>) -> Result<Vec<Stage>, GameServiceError> {
        let mut stages: Vec<Stage> = self
            .stages
            .lock()
            .unwrap()
            .iter()
            .filter(|s| locale.is_none_or(|l| s.locale == l))
            .cloned()
            .collect();
        stages.sort_by_key(|s| s.num_order);
        Ok(stages)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Stage>, GameServiceError> {
        Ok(self
            .stages
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Stage>, GameServiceError> {
        Ok(self
            .stages
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.locale == locale && s.num_order == num_order)
            .cloned())
    }

    async fn first(&self, locale: Locale) -> Result<Option<Stage>, GameServiceError> {
        Ok(self
            .stages
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.locale == locale)
            .min_by_key(|s| s.num_order)
            .cloned())
    }

    async fn paragraphs(&self, _stage_id: Uuid) -> Result<Vec<StageParagraph>, GameServiceError> {
        Ok(vec![])
    }

    async fn create(&self, stage: &Stage, _paragraphs: &[String]) -> Result<(), GameServiceError> {
        self.stages.lock().unwrap().push(stage.clone());
        Ok(())
    }

    async fn update(&self, stage: &Stage, _paragraphs: &[String]) -> Result<(), GameServiceError> {
        let mut stages = self.stages.lock().unwrap();
        if let Some(existing) = stages.iter_mut().find(|s| s.id == stage.id) {
            *existing = stage.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let mut stages = self.stages.lock().unwrap();
        let before = stages.len();
        stages.retain(|s| s.id != id);
        if stages.len() == before {
            return Ok(false);
        }

        // Storage-level cascade: games of the stage, their questions and
        // answers, and ledger rows pointing at those games.
        let mut games = self.games.lock().unwrap();
        let doomed_games: Vec<Uuid> = games
            .iter()
            .filter(|g| g.stage_id == id)
            .map(|g| g.id)
            .collect();
        games.retain(|g| g.stage_id != id);
        self.questions
            .lock()
            .unwrap()
            .retain(|q| !doomed_games.contains(&q.question.game_id));
        self.entries
            .lock()
            .unwrap()
            .retain(|e| !doomed_games.contains(&e.game_id));
        Ok(true)
    }
}

// ── Section repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemorySectionRepo {
    sections: Arc<Mutex<Vec<Section>>>,
}

impl SectionRepository for InMemorySectionRepo {
    async fn list(&self, locale: Option<Locale>) -> Result<Vec<Section>, GameServiceError> {
        let mut sections: Vec<Section> = self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| locale.is_none_or(|l| s.locale == l))
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.num_order);
        Ok(sections)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Section>, GameServiceError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Section>, GameServiceError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.locale == locale && s.num_order == num_order)
            .cloned())
    }

    async fn first(&self, locale: Locale) -> Result<Option<Section>, GameServiceError> {
        Ok(self
            .sections
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.locale == locale)
            .min_by_key(|s| s.num_order)
            .cloned())
    }

    async fn create(&self, section: &Section) -> Result<(), GameServiceError> {
        self.sections.lock().unwrap().push(section.clone());
        Ok(())
    }

    async fn update(&self, section: &Section) -> Result<(), GameServiceError> {
        let mut sections = self.sections.lock().unwrap();
        if let Some(existing) = sections.iter_mut().find(|s| s.id == section.id) {
            *existing = section.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let mut sections = self.sections.lock().unwrap();
        let before = sections.len();
        sections.retain(|s| s.id != id);
        Ok(sections.len() != before)
    }
}

// ── Game repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryGameRepo {
    games: Arc<Mutex<Vec<Game>>>,
    questions: Arc<Mutex<Vec<QuestionWithAnswers>>>,
}

impl GameRepository for InMemoryGameRepo {
    async fn list(
        &self,
        locale: Option<Locale>,
        stage_id: Option<Uuid>,
    ) -> Result<Vec<Game>, GameServiceError> {
        let mut games: Vec<Game> = self
            .games
            .lock()
            .unwrap()
            .iter()
            .filter(|g| locale.is_none_or(|l| g.locale == l))
            .filter(|g| stage_id.is_none_or(|id| g.stage_id == id))
            .cloned()
            .collect();
        games.sort_by_key(|g| g.num_order);
        Ok(games)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Game>, GameServiceError> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn find_by_order(
        &self,
        locale: Locale,
        num_order: i32,
    ) -> Result<Option<Game>, GameServiceError> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.locale == locale && g.num_order == num_order)
            .cloned())
    }

    async fn first_in(
        &self,
        stage_id: Uuid,
        section_id: Option<Uuid>,
    ) -> Result<Option<Game>, GameServiceError> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.stage_id == stage_id)
            .filter(|g| section_id.is_none_or(|id| g.section_id == Some(id)))
            .min_by_key(|g| g.num_order)
            .cloned())
    }

    async fn questions_with_answers(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<QuestionWithAnswers>, GameServiceError> {
        let mut questions: Vec<QuestionWithAnswers> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.question.game_id == game_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.question.position);
        Ok(questions)
    }

    async fn create(&self, game: &Game) -> Result<(), GameServiceError> {
        self.games.lock().unwrap().push(game.clone());
        Ok(())
    }

    async fn update(&self, game: &Game) -> Result<(), GameServiceError> {
        let mut games = self.games.lock().unwrap();
        if let Some(existing) = games.iter_mut().find(|g| g.id == game.id) {
            *existing = game.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let mut games = self.games.lock().unwrap();
        let before = games.len();
        games.retain(|g| g.id != id);
        Ok(games.len() != before)
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryUserRepo {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, GameServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, GameServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.subject == subject)
            .cloned())
    }

    async fn list(&self, _page: PageRequest) -> Result<Vec<User>, GameServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create(&self, user: &User) -> Result<(), GameServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.subject == user.subject) {
            return Err(GameServiceError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), GameServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GameServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }
}

// ── Progress repository ──────────────────────────────────────────────────────

#[derive(Clone)]
struct WorldHandles {
    stages: Arc<Mutex<Vec<Stage>>>,
    sections: Arc<Mutex<Vec<Section>>>,
    games: Arc<Mutex<Vec<Game>>>,
    entries: Arc<Mutex<Vec<LedgerEntry>>>,
    pointers: Arc<Mutex<Vec<(Uuid, Uuid)>>>,
}

#[derive(Clone)]
pub struct InMemoryProgressRepo {
    world: WorldHandles,
}

impl ProgressRepository for InMemoryProgressRepo {
    async fn find_current(&self, user_id: Uuid) -> Result<Option<LedgerEntry>, GameServiceError> {
        let pointer = self
            .world
            .pointers
            .lock()
            .unwrap()
            .iter()
            .find(|(uid, _)| *uid == user_id)
            .map(|(_, eid)| *eid);
        let Some(pointer) = pointer else {
            return Ok(None);
        };
        Ok(self
            .world
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == pointer && e.status_game == ProgressStatus::Current)
            .cloned())
    }

    async fn has_any(&self, user_id: Uuid) -> Result<bool, GameServiceError> {
        Ok(self
            .world
            .entries
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.user_id == user_id))
    }

    async fn list(
        &self,
        user_id: Uuid,
        _page: PageRequest,
    ) -> Result<Vec<LedgerEntry>, GameServiceError> {
        let mut entries: Vec<LedgerEntry> = self
            .world
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.position));
        Ok(entries)
    }

    async fn create_initial(&self, entry: &LedgerEntry) -> Result<(), GameServiceError> {
        self.world.entries.lock().unwrap().push(entry.clone());
        let mut pointers = self.world.pointers.lock().unwrap();
        pointers.retain(|(uid, _)| *uid != entry.user_id);
        pointers.push((entry.user_id, entry.id));
        Ok(())
    }

    async fn advance_current(
        &self,
        user_id: Uuid,
        score: i32,
    ) -> Result<AdvanceOutcome, GameServiceError> {
        let pointer = self
            .world
            .pointers
            .lock()
            .unwrap()
            .iter()
            .find(|(uid, _)| *uid == user_id)
            .map(|(_, eid)| *eid)
            .ok_or(GameServiceError::NoCurrentEntry)?;

        let (game_order, locale, stage_id, position) = {
            let entries = self.world.entries.lock().unwrap();
            let entry = entries
                .iter()
                .find(|e| e.id == pointer)
                .ok_or(GameServiceError::NoCurrentEntry)?;
            if entry.is_finished {
                return Err(GameServiceError::AlreadyFinalized);
            }
            (entry.game_order, entry.locale, entry.stage_id, entry.position)
        };

        let next_game = self
            .world
            .games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.locale == locale && g.num_order == game_order + 1)
            .cloned();
        let stage_done = next_game.as_ref().is_none_or(|g| g.stage_id != stage_id);

        {
            let mut entries = self.world.entries.lock().unwrap();
            let entry = entries.iter_mut().find(|e| e.id == pointer).unwrap();
            entry.score = score;
            entry.is_finished = true;
            entry.status_game = ProgressStatus::Validated;
            entry.status_section = ProgressStatus::Validated;
            if stage_done {
                entry.status_stage = ProgressStatus::Validated;
            }
        }

        let Some(next_game) = next_game else {
            return Ok(AdvanceOutcome::Finished);
        };

        let stage = self
            .world
            .stages
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == next_game.stage_id)
            .cloned()
            .ok_or(GameServiceError::StageNotFound)?;
        let section = next_game.section_id.and_then(|id| {
            self.world
                .sections
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned()
        });

        let next_entry = LedgerEntry {
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
            position: position + 1,
            locale,
            score: 0,
            is_finished: false,
            status_stage: ProgressStatus::Current,
            status_section: ProgressStatus::Current,
            status_game: ProgressStatus::Current,
            created_at: Utc::now(),
        };
        self.world.entries.lock().unwrap().push(next_entry.clone());
        {
            let mut pointers = self.world.pointers.lock().unwrap();
            pointers.retain(|(uid, _)| *uid != user_id);
            pointers.push((user_id, next_entry.id));
        }

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
    }
}
