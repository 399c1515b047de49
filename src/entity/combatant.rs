//! Combat statistics carried by entities that can fight

use serde::{Deserialize, Serialize};

use crate::combat::damage::{AttackKind, DamageInfo, DamageKind};

/// Offensive and defensive scalars for attack resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack_damage: i32,
    pub defense: i32,
    /// Weapon reach in the same unit as anatomy combat reach
    pub reach: f32,
    /// 0.0 to 1.0-ish; multiplies the base hit chance
    pub accuracy: f32,
    /// Mechanical advantage; divides the defender's defense contribution
    pub leverage: f32,
    pub preferred_kind: DamageKind,
}

impl CombatStats {
    pub fn new(attack_damage: i32, defense: i32, reach: f32, kind: DamageKind) -> Self {
        Self {
            attack_damage,
            defense,
            reach,
            accuracy: 1.0,
            leverage: 1.0,
            preferred_kind: kind,
        }
    }

    /// Unarmed scrapper
    pub fn brawler() -> Self {
        Self::new(6, 3, 1.0, DamageKind::Blunt)
    }

    /// Sidearm-length blade
    pub fn swordsman() -> Self {
        Self::new(12, 5, 1.5, DamageKind::Sharp)
    }

    /// Long haft, high leverage
    pub fn spearman() -> Self {
        let mut stats = Self::new(10, 4, 2.5, DamageKind::Piercing);
        stats.leverage = 1.5;
        stats
    }

    /// Build the attack descriptor this combatant produces
    pub fn damage_info(&self) -> DamageInfo {
        DamageInfo {
            amount: self.attack_damage as f32,
            kind: self.preferred_kind,
            armor_penetration: 0.0,
            critical_multiplier: 2.0,
            attack_kind: AttackKind::Melee,
            reach: self.reach,
            leverage: self.leverage,
        }
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::brawler()
    }
}
