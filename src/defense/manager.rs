//! Entity manager for the defense playfield
//!
//! Owns every monster. The UI only ever holds ids. Entities are kept sorted
//! by id so iteration order is stable, and ids are never reused.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, MonsterConfig};
use super::observer::DefenseObserver;
use crate::consts::{SCREEN_WIDTH, WRAP_X};

/// Where monsters leave the screen and where they come back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// Crossing this x (strictly) drains the player
    pub boundary_x: f32,
    /// Re-entry x after a crossing; `None` leaves the entity where it is
    pub wrap_x: Option<f32>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            boundary_x: SCREEN_WIDTH,
            wrap_x: Some(WRAP_X),
        }
    }
}

pub struct EntityManager<O: DefenseObserver> {
    boundary: BoundaryConfig,
    entities: Vec<Entity>,
    score: u64,
    next_id: u32,
    observer: O,
}

impl<O: DefenseObserver> EntityManager<O> {
    pub fn new(boundary: BoundaryConfig, observer: O) -> Self {
        Self {
            boundary,
            entities: Vec::new(),
            score: 0,
            next_id: 1,
            observer,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a monster at (x, y) and return its id
    pub fn spawn(&mut self, config: &MonsterConfig, x: f32, y: f32) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, config, Vec2::new(x, y)));
        log::debug!("Spawned {:?} {} at ({:.0}, {:.0})", config.kind, id, x, y);
        id
    }

    /// Damage a monster. Returns true only on the hit that kills it.
    pub fn apply_damage(&mut self, id: u32, amount: u32) -> bool {
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if !entity.take_damage(amount) {
            return false;
        }

        let score_value = entity.score_value;
        log::debug!("Entity {} killed (+{})", id, score_value);
        self.observer.on_entity_killed(id);
        self.add_score(score_value);
        true
    }

    /// Advance every live monster by `delta` frames
    pub fn tick(&mut self, delta: f32) {
        let boundary = self.boundary;
        for entity in self.entities.iter_mut().filter(|e| e.active) {
            entity.pos.x += entity.speed * delta;

            if entity.pos.x > boundary.boundary_x {
                if !entity.crossed {
                    entity.crossed = true;
                    log::debug!("Entity {} crossed the boundary", entity.id);
                    self.observer.on_boundary_crossed(entity.id, entity.damage);

                    if let Some(wrap_x) = boundary.wrap_x {
                        entity.pos.x = wrap_x;
                        entity.crossed = false;
                    }
                }
            } else {
                entity.crossed = false;
            }
        }
    }

    /// Delete a monster. Death alone never removes it.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        self.entities.len() != before
    }

    /// Drop every dead monster and return how many went
    pub fn remove_inactive(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.active);
        before - self.entities.len()
    }

    pub fn add_score(&mut self, value: u64) {
        self.score += value;
        self.observer.on_score_change(self.score);
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Move a monster (used for randomized re-entry)
    pub fn set_position(&mut self, id: u32, x: f32, y: f32) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => {
                entity.pos = Vec2::new(x, y);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn is_active(&self, id: u32) -> bool {
        self.get(id).is_some_and(|e| e.active)
    }

    /// All entities (live and dead), ascending id
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn active_ids(&self) -> Vec<u32> {
        self.entities.iter().filter(|e| e.active).map(|e| e.id).collect()
    }

    pub fn active_count(&self) -> usize {
        self.entities.iter().filter(|e| e.active).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Clear all monsters and the score. Ids keep counting up.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.score = 0;
        self.observer.on_score_change(0);
    }
}
