//! Tick orchestration - the simulation façade the driver talks to
//!
//! Owns the scheduler, the physiology processor, the damage resolver and
//! the spatial grid, and runs each active entity's full pass in order:
//! vitals check, functionality cascade, physiology stages, activation
//! re-evaluation. Everything is synchronous; one entity finishes before
//! the next starts.

use crate::combat::damage::{AttackResult, DamageInfo};
use crate::combat::resolver::DamageResolver;
use crate::core::config::SimulationConfig;
use crate::core::types::EntityId;
use crate::ecs::world::World;
use crate::physiology::processor::PhysiologyProcessor;
use crate::simulation::scheduler::ActivationScheduler;
use crate::spatial::grid::SpatialGrid;

/// Events generated during a simulation tick, for the driver's log
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// An entity's vital functions failed or its health ran out
    Died { entity: EntityId },
}

/// Aggregates the systems and runs them in the correct order
pub struct Simulation {
    pub scheduler: ActivationScheduler,
    pub grid: SpatialGrid,
    physiology: PhysiologyProcessor,
    resolver: DamageResolver,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            scheduler: ActivationScheduler::new(),
            grid: SpatialGrid::new(),
            physiology: PhysiologyProcessor::new(config),
            resolver: DamageResolver::new(),
        }
    }

    /// Fully deterministic simulation for tests and replays
    pub fn seeded(config: SimulationConfig, seed: u64) -> Self {
        Self {
            scheduler: ActivationScheduler::new(),
            grid: SpatialGrid::new(),
            physiology: PhysiologyProcessor::seeded(config, seed),
            resolver: DamageResolver::seeded(seed.wrapping_add(1)),
        }
    }

    /// Run one entity's full pass: vitals, cascade, physiology,
    /// activation re-evaluation
    pub fn advance_tick(&mut self, world: &mut World, entity: EntityId) -> Option<SimulationEvent> {
        let Some((anatomy, health)) = world.anatomy_and_health_mut(entity) else {
            self.scheduler.mark_inactive(entity);
            return None;
        };

        let was_alive = health.alive;

        // Vitals: a body that can no longer live zeroes its health
        if health.alive && !anatomy.is_functional() {
            health.current_health = 0;
            health.alive = false;
        }

        anatomy.cascade_functionality();

        if health.alive {
            self.physiology.process(anatomy, health);
        }

        if !self.physiology.should_stay_active(anatomy, health) {
            self.scheduler.mark_inactive(entity);
        }
        let died = was_alive && !health.alive;

        if died {
            tracing::info!(entity = ?entity, tick = world.current_tick, "entity died");
            return Some(SimulationEvent::Died { entity });
        }
        None
    }

    /// Advance every active entity one tick and bump the world clock
    pub fn run_tick(&mut self, world: &mut World) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        for entity in self.scheduler.snapshot() {
            if let Some(event) = self.advance_tick(world, entity) {
                events.push(event);
            }
        }
        world.tick();
        tracing::debug!(
            tick = world.current_tick,
            active = self.scheduler.active_count(),
            "tick complete"
        );
        events
    }

    /// Resolve an attack and keep the active set consistent with it
    ///
    /// Both participants are marked active before returning, so the
    /// wound starts bleeding on the very next tick.
    pub fn resolve_attack(
        &mut self,
        world: &mut World,
        attacker: EntityId,
        defender: EntityId,
        info: &DamageInfo,
    ) -> AttackResult {
        let result = self.resolver.resolve_attack(world, attacker, defender, info);
        if result.hit {
            self.scheduler.mark_active(attacker);
            self.scheduler.mark_active(defender);
        }
        result
    }

    /// Inflict a named wound directly (traps, scripted events)
    ///
    /// Falls back to plain health damage when the target has no anatomy;
    /// returns false only when there was nothing to damage at all.
    pub fn inflict_wound(
        &mut self,
        world: &mut World,
        entity: EntityId,
        part_name: &str,
        damage: i32,
        bleed_severity: i32,
    ) -> bool {
        if let Some(anatomy) = world.anatomy_mut(entity) {
            let Some(index) = anatomy.find_part_index(part_name) else {
                return false;
            };
            anatomy.parts[index].take_damage(damage);
            anatomy.parts[index].bleeding_intensity += bleed_severity;
            self.scheduler.mark_active(entity);
            return true;
        }
        if let Some(health) = world.health_mut(entity) {
            health.take_damage(damage);
            self.scheduler.mark_active(entity);
            return true;
        }
        false
    }

    /// Spawn helper that also registers the entity on the grid and in
    /// the active set for its first settling ticks
    pub fn register(&mut self, world: &World, entity: EntityId) {
        if let Some(pos) = world.position(entity) {
            self.grid.insert(entity, pos.x, pos.y);
        }
        self.scheduler.mark_active(entity);
    }
}
