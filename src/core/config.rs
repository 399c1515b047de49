//! Simulation configuration with documented constants
//!
//! All physiology tunables are collected here with explanations of their
//! purpose and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::{MarrowError, Result};

/// Configuration for the physiology simulation
///
/// These values have been tuned to produce plausible pacing: an untreated
/// arterial wound kills in tens of ticks, a starving entity declines over
/// thousands. Changing them shifts how forgiving the simulation feels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === CIRCULATION ===
    /// Chance per tick that a bleeding part clots (intensity -1)
    ///
    /// At the default (0.10), an intensity-5 wound takes ~50 ticks to close
    /// on its own. Set to 0.0 to disable clotting entirely.
    pub clot_chance: f32,

    /// Liters of blood lost per intensity point per tick
    ///
    /// With 5.0 L of blood and the default rate (0.05), a single
    /// intensity-10 wound empties half the blood supply in 5 ticks.
    pub blood_loss_per_intensity: f32,

    /// Blood ratio below which hypovolemic shock damage starts
    pub shock_threshold: f32,

    /// Direct health damage per tick while in hypovolemic shock
    pub shock_damage: i32,

    /// Circulation efficiency below which the heart is considered stopped
    pub circulatory_failure_threshold: f32,

    /// Direct health damage per tick of circulatory failure
    pub circulatory_failure_damage: i32,

    // === RESPIRATION ===
    /// Oxygen saturation points consumed per tick
    pub oxygen_consumption: f32,

    /// Oxygen recovery scale; actual recovery is
    /// `oxygen_recovery * respiration_efficiency * blood_ratio`
    pub oxygen_recovery: f32,

    /// Saturation below which hypoxia starts damaging neural parts
    pub hypoxia_threshold: f32,

    /// Hit points of damage per tick to each neural part while hypoxic
    pub hypoxia_damage: i32,

    // === METABOLISM ===
    /// Direct health damage per tick once stored energy is exhausted
    pub starvation_damage: i32,

    // === STRESS & ADRENALINE ===
    /// Accumulated pain above which adrenaline starts rising
    pub adrenaline_pain_trigger: f32,

    /// Adrenaline gained per point of pain above the trigger
    pub adrenaline_response_rate: f32,

    /// Adrenaline lost per tick
    pub adrenaline_decay: f32,

    /// Stress gained per unit of adrenaline decay (the crash)
    pub adrenaline_crash_rate: f32,

    /// Pain above which stress accumulates
    pub pain_stress_threshold: f32,

    /// Stress gained per point of pain per tick
    pub pain_stress_rate: f32,

    /// Stress lost per tick
    pub stress_decay: f32,

    /// Adrenaline above which pain masking kicks in
    pub pain_masking_threshold: f32,

    /// Pain masked per unit of adrenaline
    pub pain_masking_rate: f32,

    // === HEALING ===
    /// Stored energy required before natural healing runs
    ///
    /// Healing is a luxury: below this reserve the body spends nothing
    /// on repair, which also removes healed-up entities from the active
    /// set sooner.
    pub heal_energy_threshold: f32,

    /// Energy spent per successful heal
    pub heal_energy_cost: f32,

    /// Hit points restored per heal (one part per entity per tick)
    pub heal_amount: i32,

    // === ACTIVATION ===
    /// Accumulated pain above which an entity stays in the active set
    pub active_pain_threshold: f32,

    /// Stress above which an entity stays in the active set
    pub active_stress_threshold: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            clot_chance: 0.10,
            blood_loss_per_intensity: 0.05,
            shock_threshold: 0.5,
            shock_damage: 1,
            circulatory_failure_threshold: 0.1,
            circulatory_failure_damage: 2,
            oxygen_consumption: 2.0,
            oxygen_recovery: 5.0,
            hypoxia_threshold: 30.0,
            hypoxia_damage: 1,
            starvation_damage: 1,
            adrenaline_pain_trigger: 20.0,
            adrenaline_response_rate: 0.1,
            adrenaline_decay: 2.0,
            adrenaline_crash_rate: 0.1,
            pain_stress_threshold: 5.0,
            pain_stress_rate: 0.01,
            stress_decay: 0.1,
            pain_masking_threshold: 10.0,
            pain_masking_rate: 0.5,
            heal_energy_threshold: 500.0,
            heal_energy_cost: 10.0,
            heal_amount: 1,
            active_pain_threshold: 5.0,
            active_stress_threshold: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from TOML text; missing keys fall back to defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MarrowError::ConfigError(e.to_string()))
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}
