//! Attack descriptors and resolution results
//!
//! Transient value types: a DamageInfo goes in, an AttackResult comes
//! out, neither is persisted.

use serde::{Deserialize, Serialize};

/// How the damage is delivered; each kind interacts differently with
/// armor and body parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Less blocked by armor, high pain
    Blunt,
    /// Heavy bleeding, arterial risk
    Sharp,
    /// High armor penetration, likely to reach internal parts
    Piercing,
    /// Bypasses physical armor
    Energy,
    /// Corrodes and lingers
    Acid,
}

impl DamageKind {
    /// Chance that a wound of this kind starts bleeding
    pub fn bleed_chance(&self) -> f32 {
        match self {
            DamageKind::Sharp => 0.8,
            DamageKind::Piercing => 0.4,
            DamageKind::Blunt => 0.1,
            _ => 0.0,
        }
    }

    /// Pain multiplier; blunt trauma hurts disproportionately
    pub fn pain_factor(&self) -> f32 {
        match self {
            DamageKind::Blunt => 1.5,
            _ => 1.0,
        }
    }

    /// Only edged and pointed damage can open arteries
    pub fn severs_arteries(&self) -> bool {
        matches!(self, DamageKind::Sharp | DamageKind::Piercing)
    }

    /// Base chance to drill past a hit part into one of its children
    pub fn internal_hit_chance(&self) -> f32 {
        match self {
            DamageKind::Piercing => 0.4,
            _ => 0.1,
        }
    }
}

/// Category of the attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Melee,
    Ranged,
    Magic,
    Environmental,
    /// Poison, hunger and other internal sources
    Systemic,
}

/// Detailed information about an incoming attack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageInfo {
    pub amount: f32,
    pub kind: DamageKind,
    /// 0.0 (none) to 1.0 (full bypass)
    pub armor_penetration: f32,
    pub critical_multiplier: f32,
    pub attack_kind: AttackKind,
    /// Attacker-side scalars, carried on the descriptor so the resolver
    /// never needs the attacker's components for the math
    pub reach: f32,
    pub leverage: f32,
}

impl DamageInfo {
    pub fn new(amount: f32, kind: DamageKind) -> Self {
        Self {
            amount,
            kind,
            armor_penetration: 0.0,
            critical_multiplier: 2.0,
            attack_kind: AttackKind::Melee,
            reach: 1.0,
            leverage: 1.0,
        }
    }

    pub fn with_penetration(mut self, penetration: f32) -> Self {
        self.armor_penetration = penetration;
        self
    }
}

/// Result of a resolved attack
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    pub critical: bool,
    pub damage_dealt: f32,
    pub part_name: String,
    pub part_destroyed: bool,
    pub arterial_hit: bool,
    /// The struck part's pain level after the hit
    pub pain_inflicted: f32,
}
