//! ECS World - entity registry and component storage
//!
//! Plain component maps keyed by entity id. The simulation core only
//! ever asks for presence, typed access, and the paired anatomy+health
//! borrow the resolver and physiology passes need.

use ahash::AHashMap;

use crate::anatomy::component::AnatomyComponent;
use crate::blueprints::instance::instantiate;
use crate::blueprints::schema::BodyTemplate;
use crate::core::types::{EntityId, TilePos};
use crate::entity::combatant::CombatStats;
use crate::entity::health::HealthComponent;

const DEFAULT_MAX_HEALTH: i32 = 100;

/// The world containing all entities and their components
#[derive(Debug, Default)]
pub struct World {
    pub current_tick: u64,
    names: AHashMap<EntityId, String>,
    anatomies: AHashMap<EntityId, AnatomyComponent>,
    healths: AHashMap<EntityId, HealthComponent>,
    combat_stats: AHashMap<EntityId, CombatStats>,
    positions: AHashMap<EntityId, TilePos>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with an anatomy instantiated from a template
    pub fn spawn(&mut self, name: &str, template: &BodyTemplate, pos: TilePos) -> EntityId {
        let id = EntityId::new();
        self.names.insert(id, name.to_string());
        self.anatomies.insert(id, instantiate(template));
        self.healths.insert(id, HealthComponent::new(DEFAULT_MAX_HEALTH));
        self.positions.insert(id, pos);
        tracing::debug!(entity = ?id, template = %template.name, "spawned");
        id
    }

    /// Create an entity with health but no anatomy (doors, barrels,
    /// simple hazards); damage to it skips the anatomical path
    pub fn spawn_bare(&mut self, name: &str, max_health: i32, pos: TilePos) -> EntityId {
        let id = EntityId::new();
        self.names.insert(id, name.to_string());
        self.healths.insert(id, HealthComponent::new(max_health));
        self.positions.insert(id, pos);
        id
    }

    pub fn despawn(&mut self, id: EntityId) {
        self.names.remove(&id);
        self.anatomies.remove(&id);
        self.healths.remove(&id);
        self.combat_stats.remove(&id);
        self.positions.remove(&id);
    }

    pub fn has_anatomy(&self, id: EntityId) -> bool {
        self.anatomies.contains_key(&id)
    }

    pub fn has_health(&self, id: EntityId) -> bool {
        self.healths.contains_key(&id)
    }

    pub fn anatomy(&self, id: EntityId) -> Option<&AnatomyComponent> {
        self.anatomies.get(&id)
    }

    pub fn anatomy_mut(&mut self, id: EntityId) -> Option<&mut AnatomyComponent> {
        self.anatomies.get_mut(&id)
    }

    pub fn health(&self, id: EntityId) -> Option<&HealthComponent> {
        self.healths.get(&id)
    }

    pub fn health_mut(&mut self, id: EntityId) -> Option<&mut HealthComponent> {
        self.healths.get_mut(&id)
    }

    /// Both mutable halves the damage and physiology passes operate on
    pub fn anatomy_and_health_mut(
        &mut self,
        id: EntityId,
    ) -> Option<(&mut AnatomyComponent, &mut HealthComponent)> {
        let anatomy = self.anatomies.get_mut(&id)?;
        let health = self.healths.get_mut(&id)?;
        Some((anatomy, health))
    }

    pub fn combat_stats(&self, id: EntityId) -> Option<&CombatStats> {
        self.combat_stats.get(&id)
    }

    pub fn set_combat_stats(&mut self, id: EntityId, stats: CombatStats) {
        self.combat_stats.insert(id, stats);
    }

    pub fn position(&self, id: EntityId) -> Option<TilePos> {
        self.positions.get(&id).copied()
    }

    pub fn set_position(&mut self, id: EntityId, pos: TilePos) {
        self.positions.insert(id, pos);
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.names.get(&id).map(|s| s.as_str())
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.healths.get(&id).map(|h| h.alive).unwrap_or(false)
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.names.keys().copied()
    }

    pub fn entity_count(&self) -> usize {
        self.names.len()
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprints::catalog::human;

    #[test]
    fn test_spawn_attaches_components() {
        let mut world = World::new();
        let id = world.spawn("Aldo", &human(), TilePos::new(1, 2));

        assert!(world.has_anatomy(id));
        assert!(world.has_health(id));
        assert!(world.is_alive(id));
        assert_eq!(world.name(id), Some("Aldo"));
        assert_eq!(world.position(id), Some(TilePos::new(1, 2)));
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_despawn_removes_everything() {
        let mut world = World::new();
        let id = world.spawn("Aldo", &human(), TilePos::new(0, 0));
        world.despawn(id);

        assert!(!world.has_anatomy(id));
        assert!(!world.is_alive(id));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_paired_borrow() {
        let mut world = World::new();
        let id = world.spawn("Aldo", &human(), TilePos::new(0, 0));
        let (anatomy, health) = world.anatomy_and_health_mut(id).unwrap();
        anatomy.take_damage_to_part("Torso", 5);
        health.take_damage(5);
        assert_eq!(world.health(id).unwrap().current_health, 95);
    }

    #[test]
    fn test_missing_components_are_none() {
        let world = World::new();
        let ghost = EntityId::new();
        assert!(world.anatomy(ghost).is_none());
        assert!(world.combat_stats(ghost).is_none());
        assert!(!world.is_alive(ghost));
    }
}
