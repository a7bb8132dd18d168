//! Callbacks from the defense core to the UI
//!
//! The UI injects a [`DefenseObserver`] when it builds the manager or the
//! session. Every method has an empty default so an observer only needs
//! the events it cares about.

use serde::{Deserialize, Serialize};

pub trait DefenseObserver {
    fn on_score_change(&mut self, _score: u64) {}
    fn on_entity_killed(&mut self, _id: u32) {}
    fn on_boundary_crossed(&mut self, _id: u32, _damage: u32) {}
}

/// Ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DefenseObserver for NullObserver {}

/// Defense events in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseEvent {
    ScoreChanged { score: u64 },
    EntityKilled { id: u32 },
    BoundaryCrossed { id: u32, damage: u32 },
}

/// Records events for later draining
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: Vec<DefenseEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<DefenseEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[DefenseEvent] {
        &self.events
    }
}

impl DefenseObserver for EventQueue {
    fn on_score_change(&mut self, score: u64) {
        self.events.push(DefenseEvent::ScoreChanged { score });
    }

    fn on_entity_killed(&mut self, id: u32) {
        self.events.push(DefenseEvent::EntityKilled { id });
    }

    fn on_boundary_crossed(&mut self, id: u32, damage: u32) {
        self.events.push(DefenseEvent::BoundaryCrossed { id, damage });
    }
}

impl<O: DefenseObserver + ?Sized> DefenseObserver for Box<O> {
    fn on_score_change(&mut self, score: u64) {
        (**self).on_score_change(score);
    }

    fn on_entity_killed(&mut self, id: u32) {
        (**self).on_entity_killed(id);
    }

    fn on_boundary_crossed(&mut self, id: u32, damage: u32) {
        (**self).on_boundary_crossed(id, damage);
    }
}

impl DefenseEvent {
    /// Replay this event into an observer
    pub fn dispatch<O: DefenseObserver + ?Sized>(self, observer: &mut O) {
        match self {
            DefenseEvent::ScoreChanged { score } => observer.on_score_change(score),
            DefenseEvent::EntityKilled { id } => observer.on_entity_killed(id),
            DefenseEvent::BoundaryCrossed { id, damage } => observer.on_boundary_crossed(id, damage),
        }
    }
}
