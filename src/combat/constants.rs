//! Combat resolution constants - all tunable values in one place

/// Base hit chance before accuracy, reach and defense adjustments
pub const BASE_HIT_CHANCE: f32 = 0.8;

/// Hit chance gained per unit of reach advantage over the defender
pub const REACH_ADVANTAGE_BONUS: f32 = 0.15;

/// Hit chance lost per point of (defense / leverage)
pub const DEFENSE_FACTOR: f32 = 0.05;

/// Each successful drill-down into a child halves the remaining chance
pub const PENETRATION_DECAY: f32 = 0.5;

/// Blunt damage sees only this fraction of nominal armor
pub const BLUNT_ARMOR_FACTOR: f32 = 0.7;

/// Pain added per point of relative damage (damage / max hp)
pub const PAIN_SCALE: f32 = 50.0;

/// Damage dealt is divided by this to size a new bleed
pub const BLEED_DIVISOR: f32 = 5.0;

/// Scales relative damage into the arterial-hit chance
pub const ARTERIAL_HIT_SCALE: f32 = 0.5;

/// Arterial integrity lost per arterial hit
pub const ARTERIAL_DAMAGE: f32 = 0.3;

/// Fraction of overkill damage forwarded to the parent part
pub const OVERFLOW_EFFICACY: f32 = 0.5;
