//! Activation scheduler - which entities need simulation this tick
//!
//! Quiescent entities (not bleeding, not in pain, nothing to heal) cost
//! nothing. Combat marks participants active; the physiology pass
//! deactivates entities whose state has settled.

use ahash::AHashSet;

use crate::core::types::EntityId;

#[derive(Debug, Default)]
pub struct ActivationScheduler {
    active: AHashSet<EntityId>,
}

impl ActivationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_active(&mut self, entity: EntityId) {
        self.active.insert(entity);
    }

    pub fn mark_inactive(&mut self, entity: EntityId) {
        self.active.remove(&entity);
    }

    pub fn is_active(&self, entity: EntityId) -> bool {
        self.active.contains(&entity)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Membership copy for iteration while the set is being updated
    pub fn snapshot(&self) -> Vec<EntityId> {
        self.active.iter().copied().collect()
    }
}
