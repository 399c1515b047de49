//! Per-tick physiology: circulation, respiration, metabolism, pain,
//! stress and healing
//!
//! Stages run in a fixed order because later stages read the outputs of
//! earlier ones; pain masking in particular must run after the stress
//! math so adrenaline never hides pain from the same tick's stress
//! response. Each stage is gated by the body's physiology config, so a
//! bloodless construct skips circulation entirely.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::anatomy::component::AnatomyComponent;
use crate::anatomy::part::FunctionTag;
use crate::core::config::SimulationConfig;
use crate::entity::health::HealthComponent;

/// Arterial integrity below this counts as a severed artery
const ARTERY_SEVERED_THRESHOLD: f32 = 0.2;

/// Minimum bleeding intensity a severed artery sustains
const SEVERED_BLEED_INTENSITY: i32 = 5;

/// Stress gained when a body with no neural parts goes hypoxic
const SYSTEMIC_DISTRESS: f32 = 5.0;

/// Advances every entity's biological state one tick at a time
pub struct PhysiologyProcessor {
    config: SimulationConfig,
    rng: ChaCha8Rng,
}

impl PhysiologyProcessor {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn seeded(config: SimulationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run one full physiology tick for one entity
    pub fn process(&mut self, anatomy: &mut AnatomyComponent, health: &mut HealthComponent) {
        if anatomy.config.has_blood {
            self.circulation(anatomy, health);
        }
        if anatomy.config.needs_oxygen {
            self.respiration(anatomy);
        }
        if anatomy.config.has_metabolism {
            self.metabolism(anatomy, health);
        }
        if anatomy.config.feels_pain {
            self.aggregate_pain(anatomy);
            self.stress_response(anatomy);
        }
        self.healing(anatomy);
    }

    /// Bleeding, clotting, blood loss and its consequences
    ///
    /// Intensity is summed before clotting and arterial forcing, so a
    /// freshly severed artery starts paying out the following tick.
    fn circulation(&mut self, anatomy: &mut AnatomyComponent, health: &mut HealthComponent) {
        let mut total_bleeding = 0;
        for part in &mut anatomy.parts {
            total_bleeding += part.bleeding_intensity;

            if part.bleeding_intensity > 0 && self.rng.gen::<f32>() < self.config.clot_chance {
                part.bleeding_intensity -= 1;
            }

            if part.arterial_integrity < ARTERY_SEVERED_THRESHOLD {
                part.bleeding_intensity = part.bleeding_intensity.max(SEVERED_BLEED_INTENSITY);
            }
        }

        let loss = total_bleeding as f32 * self.config.blood_loss_per_intensity;
        anatomy.blood_volume = (anatomy.blood_volume - loss).max(0.0);

        if anatomy.blood_ratio() < self.config.shock_threshold {
            health.take_damage(self.config.shock_damage);
        }

        let circulation = anatomy.function_efficiency(FunctionTag::Circulation);
        if circulation < self.config.circulatory_failure_threshold && anatomy.blood_volume > 0.0 {
            health.take_damage(self.config.circulatory_failure_damage);
        }
    }

    /// Oxygen intake and hypoxia
    fn respiration(&mut self, anatomy: &mut AnatomyComponent) {
        let respiration = anatomy.function_efficiency(FunctionTag::Respiration);
        let blood_ratio = anatomy.blood_ratio();

        let mut oxygen_change = -self.config.oxygen_consumption;
        if respiration > 0.5 && blood_ratio > 0.4 {
            oxygen_change += self.config.oxygen_recovery * respiration * blood_ratio;
        }
        anatomy.oxygen_saturation = (anatomy.oxygen_saturation + oxygen_change).clamp(0.0, 100.0);

        if anatomy.oxygen_saturation < self.config.hypoxia_threshold {
            let mut found_neural = false;
            for part in &mut anatomy.parts {
                if part.has_tag(FunctionTag::Neural) {
                    part.take_damage(self.config.hypoxia_damage);
                    found_neural = true;
                    // No break: neural tissue may be distributed
                }
            }
            if !found_neural {
                anatomy.stress_level += SYSTEMIC_DISTRESS;
            }
        }
    }

    /// Fixed energy burn; an empty reserve starves
    fn metabolism(&mut self, anatomy: &mut AnatomyComponent, health: &mut HealthComponent) {
        anatomy.stored_energy -= anatomy.config.base_metabolic_rate;
        if anatomy.stored_energy < 0.0 {
            anatomy.stored_energy = 0.0;
            health.take_damage(self.config.starvation_damage);
        }
    }

    /// Recompute total pain from part damage ratios
    fn aggregate_pain(&mut self, anatomy: &mut AnatomyComponent) {
        let mut total = 0.0;
        for part in &anatomy.parts {
            if part.max_hitpoints > 0 {
                let damage_ratio =
                    1.0 - part.current_hitpoints as f32 / part.max_hitpoints as f32;
                total += damage_ratio * 10.0;
            }
        }
        anatomy.accumulated_pain = total;
    }

    /// Adrenaline spike, crash into stress, decay and pain masking
    fn stress_response(&mut self, anatomy: &mut AnatomyComponent) {
        let config = &self.config;

        if anatomy.accumulated_pain > config.adrenaline_pain_trigger {
            anatomy.adrenaline_level += (anatomy.accumulated_pain
                - config.adrenaline_pain_trigger)
                * config.adrenaline_response_rate;
        }

        if anatomy.adrenaline_level > 0.0 {
            // The crash: decaying adrenaline converts partially to stress
            anatomy.stress_level += config.adrenaline_decay * config.adrenaline_crash_rate;
            anatomy.adrenaline_level =
                (anatomy.adrenaline_level - config.adrenaline_decay).max(0.0);
        }

        if anatomy.accumulated_pain > config.pain_stress_threshold {
            anatomy.stress_level += anatomy.accumulated_pain * config.pain_stress_rate;
        }

        if anatomy.stress_level > 0.0 {
            anatomy.stress_level = (anatomy.stress_level - config.stress_decay).max(0.0);
        }

        anatomy.stress_level = anatomy.stress_level.min(100.0);
        anatomy.adrenaline_level = anatomy.adrenaline_level.min(100.0);

        // Masking runs last so it never affects this tick's stress math
        if anatomy.adrenaline_level > config.pain_masking_threshold {
            let masked = anatomy.adrenaline_level * config.pain_masking_rate;
            anatomy.accumulated_pain = (anatomy.accumulated_pain - masked).max(0.0);
        }
    }

    /// Natural healing: one part, one hit point, vital parts first
    fn healing(&mut self, anatomy: &mut AnatomyComponent) {
        if anatomy.stored_energy <= self.config.heal_energy_threshold {
            return;
        }

        let target = anatomy
            .parts
            .iter()
            .position(|p| p.vital && p.is_damaged())
            .or_else(|| anatomy.parts.iter().position(|p| !p.vital && p.is_damaged()));

        if let Some(index) = target {
            let amount = self.config.heal_amount;
            anatomy.parts[index].heal(amount);
            anatomy.stored_energy -= self.config.heal_energy_cost;
        }
    }

    /// Does this entity still need per-tick simulation?
    pub fn should_stay_active(
        &self,
        anatomy: &AnatomyComponent,
        health: &HealthComponent,
    ) -> bool {
        if !health.alive {
            return false;
        }
        if anatomy.is_bleeding() {
            return true;
        }
        if anatomy.accumulated_pain > self.config.active_pain_threshold {
            return true;
        }
        if anatomy.stress_level > self.config.active_stress_threshold {
            return true;
        }
        health.current_health < health.max_health
            && anatomy.stored_energy > self.config.heal_energy_threshold
    }
}
