//! Global health pool and liveness flag
//!
//! Anatomy drives the interesting state; this component is the coarse
//! summary collaborators (AI, rendering, the scheduler) observe. The
//! `alive` flag flipping false is the only death signal the core emits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthComponent {
    pub current_health: i32,
    pub max_health: i32,
    pub alive: bool,
}

impl HealthComponent {
    pub fn new(max_health: i32) -> Self {
        Self {
            current_health: max_health,
            max_health,
            alive: true,
        }
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.current_health -= damage;
        if self.current_health <= 0 {
            self.current_health = 0;
            self.alive = false;
        }
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
        if self.current_health > 0 {
            self.alive = true;
        }
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0 {
            self.current_health as f32 / self.max_health as f32
        } else {
            0.0
        }
    }
}

impl Default for HealthComponent {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lethal_damage_flips_alive() {
        let mut health = HealthComponent::new(10);
        health.take_damage(10);
        assert!(!health.alive);
        assert_eq!(health.current_health, 0);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut health = HealthComponent::new(10);
        health.take_damage(500);
        assert_eq!(health.current_health, 0);
    }

    #[test]
    fn test_heal_revives_and_clamps() {
        let mut health = HealthComponent::new(10);
        health.take_damage(10);
        health.heal(25);
        assert!(health.alive);
        assert_eq!(health.current_health, 10);
    }
}
