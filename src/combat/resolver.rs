//! Attack resolution with anatomical precision
//!
//! Turns an attack descriptor into a concrete body-part hit: to-hit roll,
//! weighted target selection with drill-down into internal parts, armor,
//! criticals, secondary effects and overkill spill to the parent part.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::anatomy::component::AnatomyComponent;
use crate::anatomy::part::BodyPart;
use crate::combat::constants;
use crate::combat::damage::{AttackResult, DamageInfo, DamageKind};
use crate::core::types::EntityId;
use crate::ecs::world::World;
use crate::entity::health::HealthComponent;

/// Resolves attacks; owns the single generator all combat randomness
/// draws from, so seeding it makes a fight reproducible
pub struct DamageResolver {
    rng: ChaCha8Rng,
}

impl DamageResolver {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Resolve an attack from `attacker` against `defender`
    ///
    /// A defender without anatomy and health, an already dead defender,
    /// or a body with no parts all produce a default no-hit result; this
    /// path never errors.
    pub fn resolve_attack(
        &mut self,
        world: &mut World,
        attacker: EntityId,
        defender: EntityId,
        info: &DamageInfo,
    ) -> AttackResult {
        let result = AttackResult::default();

        let accuracy = world
            .combat_stats(attacker)
            .map(|s| s.accuracy)
            .unwrap_or(1.0);
        let defense = world.combat_stats(defender).map(|s| s.defense).unwrap_or(0);

        let Some((anatomy, health)) = world.anatomy_and_health_mut(defender) else {
            return result;
        };
        if !health.alive {
            return result;
        }

        // To-hit is rolled before target selection; a miss costs nothing
        let leverage = if info.leverage > 0.0 { info.leverage } else { 1.0 };
        let hit_chance = constants::BASE_HIT_CHANCE * accuracy
            + constants::REACH_ADVANTAGE_BONUS * (info.reach - anatomy.combat_reach())
            - (defense as f32 / leverage) * constants::DEFENSE_FACTOR;
        if self.rng.gen::<f32>() >= hit_chance {
            return result;
        }

        let Some(target) = self.select_target_part(anatomy, info.kind) else {
            return result;
        };

        let result = self.strike_part(anatomy, health, target, info);
        tracing::debug!(
            part = %result.part_name,
            damage = result.damage_dealt,
            critical = result.critical,
            destroyed = result.part_destroyed,
            "attack connected"
        );
        result
    }

    /// Apply an attack to a known part index (steps after target
    /// selection); also the entry point for scripted or called shots
    pub fn strike_part(
        &mut self,
        anatomy: &mut AnatomyComponent,
        health: &mut HealthComponent,
        target: usize,
        info: &DamageInfo,
    ) -> AttackResult {
        let mut result = AttackResult::default();
        if target >= anatomy.parts.len() {
            return result;
        }
        result.hit = true;
        result.part_name = anatomy.parts[target].name.clone();

        let reduction = armor_reduction(&anatomy.parts[target], info);
        let mut final_damage = (info.amount - reduction).max(0.0);

        // Structurally vital parts take criticals
        if anatomy.parts[target].vital {
            final_damage *= info.critical_multiplier;
            result.critical = true;
        }

        let previous_hp = anatomy.parts[target].current_hitpoints;
        anatomy.parts[target].take_damage(final_damage as i32);
        let dealt = (previous_hp - anatomy.parts[target].current_hitpoints) as f32;
        result.damage_dealt = dealt;
        if previous_hp > 0 && anatomy.parts[target].current_hitpoints == 0 {
            result.part_destroyed = true;
        }

        let can_bleed = anatomy.config.can_bleed;
        self.apply_secondary_effects(&mut anatomy.parts[target], can_bleed, info, dealt, &mut result);

        // Global health tracks what the part actually absorbed
        health.take_damage(dealt as i32);

        // Overkill spills into the parent at reduced efficacy; a destroyed
        // hand does not fully protect the arm above it
        if final_damage > dealt {
            let parent = anatomy.parts[target].parent_index;
            if parent >= 0 {
                let spill = ((final_damage - dealt) * constants::OVERFLOW_EFFICACY) as i32;
                if spill > 0 {
                    anatomy.parts[parent as usize].take_damage(spill);
                }
            }
        }

        result
    }

    /// Two-stage weighted target selection
    ///
    /// Roots are drawn by presented cross-section; the selection then
    /// drills into children while the penetration roll keeps succeeding,
    /// with the chance halving per level.
    fn select_target_part(&mut self, anatomy: &AnatomyComponent, kind: DamageKind) -> Option<usize> {
        let roots: Vec<usize> = (0..anatomy.parts.len())
            .filter(|&i| anatomy.parts[i].parent_index < 0)
            .collect();
        if roots.is_empty() {
            return None;
        }

        let mut selected = self.weighted_pick(anatomy, &roots);
        let mut drill_chance = kind.internal_hit_chance();
        loop {
            let children: Vec<usize> = anatomy.parts[selected]
                .children
                .iter()
                .copied()
                .filter(|&c| c < anatomy.parts.len())
                .collect();
            if children.is_empty() || self.rng.gen::<f32>() >= drill_chance {
                break;
            }
            selected = self.weighted_pick(anatomy, &children);
            drill_chance *= constants::PENETRATION_DECAY;
        }
        Some(selected)
    }

    fn weighted_pick(&mut self, anatomy: &AnatomyComponent, candidates: &[usize]) -> usize {
        let weights: Vec<f32> = candidates
            .iter()
            .map(|&i| anatomy.parts[i].target_weight())
            .collect();
        match WeightedIndex::new(&weights) {
            Ok(dist) => candidates[dist.sample(&mut self.rng)],
            // All-zero weights: degrade to the first candidate
            Err(_) => candidates[0],
        }
    }

    fn apply_secondary_effects(
        &mut self,
        part: &mut BodyPart,
        can_bleed: bool,
        info: &DamageInfo,
        dealt: f32,
        result: &mut AttackResult,
    ) {
        let max_hp = part.max_hitpoints.max(1) as f32;

        part.pain_level =
            (part.pain_level + (dealt / max_hp) * constants::PAIN_SCALE * info.kind.pain_factor())
                .min(100.0);
        result.pain_inflicted = part.pain_level;

        if can_bleed && self.rng.gen::<f32>() < info.kind.bleed_chance() {
            let intensity = ((dealt / constants::BLEED_DIVISOR) as i32).max(1);
            part.bleeding_intensity += intensity;
        }

        if info.kind.severs_arteries() {
            let arterial_chance = (dealt / max_hp) * constants::ARTERIAL_HIT_SCALE;
            if self.rng.gen::<f32>() < arterial_chance {
                part.arterial_integrity = (part.arterial_integrity - constants::ARTERIAL_DAMAGE).max(0.0);
                result.arterial_hit = true;
            }
        }
    }
}

impl Default for DamageResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Effective armor after penetration; blunt damage is comparatively less
/// blocked but still reduced less than sharp or piercing
fn armor_reduction(part: &BodyPart, info: &DamageInfo) -> f32 {
    let mut effective = part.armor_value as f32 * (1.0 - info.armor_penetration);
    if info.kind == DamageKind::Blunt {
        effective *= constants::BLUNT_ARMOR_FACTOR;
    }
    effective
}
