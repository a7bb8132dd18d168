//! One playable zombie-defense run
//!
//! Ties the entity manager, attack-point wallet, spawn director, quiz and
//! rewards together behind a small command surface. The UI calls `tick`
//! once per frame, forwards clicks and answers, and renders `snapshot()`.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::director::SpawnDirector;
use super::entity::MonsterKind;
use super::manager::EntityManager;
use super::observer::{DefenseEvent, DefenseObserver, EventQueue};
use super::quiz::{Quiz, QuizMode, QuizPrompt, QuizResult};
use super::reward::{Collected, Reward, RewardKind};
use super::wallet::PointWallet;
use crate::rng::RandomSource;
use crate::schedule::Scheduler;
use crate::settings::DefenseSettings;

/// How long a dead monster stays visible before it is removed
pub const CORPSE_LINGER_MS: f64 = 1000.0;

/// Rewards never drop closer than this to the top or bottom edge
const REWARD_EDGE_MARGIN: f32 = 50.0;

/// Work queued for later frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    SpawnZombie,
    NextQuestion,
    RemoveCorpse(u32),
}

/// Result of clicking a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Damaged but still standing
    Hit { hp: u32 },
    /// This hit killed it
    Killed { score: u64 },
    /// Clicked again too soon
    Throttled,
    /// Not enough attack points
    InsufficientPoints,
    /// Unknown or already dead
    Missed,
    GameOver,
}

/// Monster as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterView {
    pub id: u32,
    pub kind: MonsterKind,
    pub x: f32,
    pub y: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardView {
    pub id: u32,
    pub kind: RewardKind,
    pub value: u32,
    pub x: f32,
    pub y: f32,
}

/// Everything the UI needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseSnapshot {
    pub score: u64,
    pub points: u32,
    pub population: usize,
    pub max_population: usize,
    pub game_over: bool,
    pub monsters: Vec<MonsterView>,
    pub rewards: Vec<RewardView>,
    pub quiz: Option<QuizPrompt>,
    pub last_quiz_result: Option<QuizResult>,
    /// Questions opened so far
    pub quiz_asked: u32,
    /// Questions answered correctly so far
    pub quiz_correct: u32,
}

pub struct DefenseSession<R: RandomSource, O: DefenseObserver> {
    settings: DefenseSettings,
    manager: EntityManager<EventQueue>,
    wallet: PointWallet,
    director: SpawnDirector,
    quiz: Quiz,
    rewards: Vec<Reward>,
    next_reward_id: u32,
    reward_timer_ms: f64,
    scheduler: Scheduler<Deferred>,
    rng: R,
    observer: O,
    game_over: bool,
    elapsed_ms: f64,
    /// Last accepted attack time per monster
    last_attack_ms: BTreeMap<u32, f64>,
    last_quiz_result: Option<QuizResult>,
}

impl<R: RandomSource, O: DefenseObserver> DefenseSession<R, O> {
    pub fn new(settings: DefenseSettings, rng: R, observer: O) -> Self {
        let manager = EntityManager::new(settings.boundary(), EventQueue::new());
        let wallet = PointWallet::new(settings.starting_points, settings.refill_points);
        let director = SpawnDirector::new(settings.director);
        let quiz = Quiz::new(settings.vocabulary.clone(), settings.quiz_rewards);
        Self {
            settings,
            manager,
            wallet,
            director,
            quiz,
            rewards: Vec::new(),
            next_reward_id: 1,
            reward_timer_ms: 0.0,
            scheduler: Scheduler::new(),
            rng,
            observer,
            game_over: false,
            elapsed_ms: 0.0,
            last_attack_ms: BTreeMap::new(),
            last_quiz_result: None,
        }
    }

    /// Put the first zombies on the field and open the first question
    pub fn start(&mut self) {
        for _ in 0..self.settings.initial_zombies {
            self.spawn_zombie();
        }
        self.quiz.next(&mut self.rng);
        log::info!(
            "Defense started with {} points, {} zombie(s)",
            self.wallet.points(),
            self.population()
        );
    }

    /// Spawn one zombie if the field has room and the run is live
    pub fn spawn_zombie(&mut self) -> Option<u32> {
        if self.game_over || !self.director.has_room(self.population()) {
            return None;
        }
        let plan = self.director.plan_spawn(self.settings.screen_height, &mut self.rng);
        Some(self.manager.spawn(&plan.config, plan.x, plan.y))
    }

    /// Click on a monster
    pub fn attack(&mut self, id: u32) -> AttackOutcome {
        if self.game_over {
            return AttackOutcome::GameOver;
        }

        if let Some(&last) = self.last_attack_ms.get(&id) {
            if self.elapsed_ms - last < self.settings.attack_throttle_ms {
                return AttackOutcome::Throttled;
            }
        }
        // Only ids the manager still holds are tracked
        if self.manager.get(id).is_some() {
            self.last_attack_ms.insert(id, self.elapsed_ms);
        }

        let cost = self.settings.attack_cost;
        if !self.wallet.can_afford(cost) {
            log::debug!("Attack on {} rejected: {} points", id, self.wallet.points());
            return AttackOutcome::InsufficientPoints;
        }
        if !self.manager.is_active(id) {
            return AttackOutcome::Missed;
        }

        self.wallet.try_spend(cost);
        let killed = self.manager.apply_damage(id, self.settings.attack_damage);
        self.process_events();

        let outcome = if killed {
            self.last_attack_ms.remove(&id);
            self.scheduler.schedule_in(CORPSE_LINGER_MS, Deferred::RemoveCorpse(id));
            for delay in self.director.on_kill(self.population(), &mut self.rng) {
                self.scheduler.schedule_in(delay, Deferred::SpawnZombie);
            }
            AttackOutcome::Killed {
                score: self.manager.score(),
            }
        } else {
            AttackOutcome::Hit {
                hp: self.manager.get(id).map_or(0, |e| e.hp),
            }
        };

        self.check_game_over();
        outcome
    }

    /// Advance one frame. `delta` is in nominal 60 Hz frames, `dt_ms` in
    /// milliseconds.
    pub fn tick(&mut self, delta: f32, dt_ms: f64) {
        if self.game_over {
            return;
        }
        self.elapsed_ms += dt_ms;

        for action in self.scheduler.advance(dt_ms) {
            match action {
                Deferred::SpawnZombie => {
                    self.spawn_zombie();
                }
                Deferred::NextQuestion => {
                    self.quiz.next(&mut self.rng);
                    self.last_quiz_result = None;
                }
                Deferred::RemoveCorpse(id) => {
                    self.manager.remove(id);
                    self.last_attack_ms.remove(&id);
                }
            }
        }

        self.manager.tick(delta);
        self.process_events();

        self.update_rewards(dt_ms);
        self.check_game_over();
    }

    /// Route queued manager events: apply them to the run, then forward
    fn process_events(&mut self) {
        for event in self.manager.observer_mut().drain() {
            if let DefenseEvent::BoundaryCrossed { id, damage } = event {
                self.wallet.drain(damage);
                let x = self.director.reentry_x(&mut self.rng);
                if let Some(y) = self.manager.get(id).map(|e| e.pos.y) {
                    self.manager.set_position(id, x, y);
                }
                log::debug!("Zombie {} got through, -{} points", id, damage);
            }
            event.dispatch(&mut self.observer);
        }
    }

    fn update_rewards(&mut self, dt_ms: f64) {
        let time_secs = self.elapsed_ms / 1000.0;
        for reward in &mut self.rewards {
            reward.update(time_secs);
        }

        let interval_ms = self.settings.reward_interval_secs * 1000.0;
        if interval_ms <= 0.0 {
            return;
        }
        self.reward_timer_ms += dt_ms;
        if self.reward_timer_ms >= interval_ms {
            self.reward_timer_ms = 0.0;
            self.spawn_reward();
        }
    }

    /// Drop a reward at a random spot
    pub fn spawn_reward(&mut self) -> u32 {
        let id = self.next_reward_id;
        self.next_reward_id += 1;

        let width = self.settings.screen_width;
        let height = self.settings.screen_height;
        let x = self.rng.range(0.0, width as f64) as f32;
        let y_max = (height - REWARD_EDGE_MARGIN).max(REWARD_EDGE_MARGIN);
        let y = self.rng.range(REWARD_EDGE_MARGIN as f64, y_max as f64) as f32;

        self.rewards.push(Reward::new(id, &self.settings.reward, Vec2::new(x, y)));
        log::debug!("Reward {} dropped at ({:.0}, {:.0})", id, x, y);
        id
    }

    /// Click on a reward
    pub fn collect_reward(&mut self, id: u32) -> Option<Collected> {
        let index = self.rewards.iter().position(|r| r.id == id && !r.collected)?;
        let mut reward = self.rewards.remove(index);
        let collected = reward.collect();

        if collected.kind == RewardKind::Score && collected.value > 0 {
            self.manager.add_score(collected.value as u64);
            self.process_events();
        }
        Some(collected)
    }

    fn after_answer(&mut self, result: Option<QuizResult>) -> Option<QuizResult> {
        let result = result?;
        self.wallet.earn(result.reward);
        self.last_quiz_result = Some(result.clone());
        self.scheduler
            .schedule_in(self.settings.quiz_advance_ms, Deferred::NextQuestion);
        Some(result)
    }

    /// Pick an option on a multiple-choice question
    pub fn answer_choice(&mut self, option: &str) -> Option<QuizResult> {
        let result = self.quiz.answer_choice(option);
        self.after_answer(result)
    }

    /// Submit a spelling answer
    pub fn answer_spelling(&mut self, input: &str) -> Option<QuizResult> {
        let result = self.quiz.answer_spelling(input);
        self.after_answer(result)
    }

    /// Confirm a memorize card; the next question opens immediately
    pub fn acknowledge_word(&mut self) -> Option<QuizResult> {
        let result = self.quiz.acknowledge()?;
        self.wallet.earn(result.reward);
        self.last_quiz_result = None;
        self.quiz.next(&mut self.rng);
        Some(result)
    }

    /// Restore points and resume after a game over
    pub fn refill(&mut self) {
        self.wallet.refill();
        self.game_over = false;
        log::info!("Points refilled to {}", self.wallet.points());

        let pending = self.scheduler.count_where(|a| *a == Deferred::SpawnZombie);
        let missing = self.director.shortfall(self.population() + pending);
        for _ in 0..missing {
            self.scheduler
                .schedule_in(self.director.config().refill_delay_ms, Deferred::SpawnZombie);
        }
    }

    fn check_game_over(&mut self) {
        if !self.game_over && self.wallet.is_depleted() {
            self.game_over = true;
            log::info!("Game over, final score {}", self.manager.score());
        }
    }

    /// Live monsters on the field
    pub fn population(&self) -> usize {
        self.manager.active_count()
    }

    pub fn score(&self) -> u64 {
        self.manager.score()
    }

    pub fn points(&self) -> u32 {
        self.wallet.points()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn quiz_mode(&self) -> Option<QuizMode> {
        self.quiz.mode()
    }

    pub fn quiz_prompt(&self) -> Option<QuizPrompt> {
        self.quiz.prompt()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn manager(&self) -> &EntityManager<EventQueue> {
        &self.manager
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn snapshot(&self) -> DefenseSnapshot {
        DefenseSnapshot {
            score: self.manager.score(),
            points: self.wallet.points(),
            population: self.population(),
            max_population: self.director.config().max_population,
            game_over: self.game_over,
            monsters: self
                .manager
                .iter()
                .map(|e| MonsterView {
                    id: e.id,
                    kind: e.kind,
                    x: e.pos.x,
                    y: e.pos.y,
                    hp: e.hp,
                    max_hp: e.max_hp,
                    active: e.active,
                })
                .collect(),
            rewards: self
                .rewards
                .iter()
                .map(|r| RewardView {
                    id: r.id,
                    kind: r.kind,
                    value: r.value,
                    x: r.pos.x,
                    y: r.pos.y,
                })
                .collect(),
            quiz: self.quiz.prompt(),
            last_quiz_result: self.last_quiz_result.clone(),
            quiz_asked: self.quiz.asked(),
            quiz_correct: self.quiz.correct(),
        }
    }
}
