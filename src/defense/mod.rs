//! Zombie defense
//!
//! Monsters walk left to right across the playfield. Clicking one costs
//! attack points; letting one through drains them. Answering vocabulary
//! questions earns points back.

pub mod director;
pub mod entity;
pub mod manager;
pub mod observer;
pub mod quiz;
pub mod reward;
pub mod session;
pub mod wallet;

pub use director::{DirectorConfig, SpawnDirector, SpawnPlan};
pub use entity::{Entity, MonsterConfig, MonsterKind};
pub use manager::{BoundaryConfig, EntityManager};
pub use observer::{DefenseEvent, DefenseObserver, EventQueue, NullObserver};
pub use quiz::{Quiz, QuizMode, QuizPrompt, QuizResult, QuizRewards, VocabularyEntry};
pub use reward::{Collected, Reward, RewardConfig, RewardKind};
pub use session::{AttackOutcome, DefenseSession, DefenseSnapshot, MonsterView, RewardView};
pub use wallet::PointWallet;
