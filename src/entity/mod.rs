pub mod combatant;
pub mod health;

pub use combatant::CombatStats;
pub use health::HealthComponent;
