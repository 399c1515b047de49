pub mod constants;
pub mod damage;
pub mod resolver;

pub use damage::{AttackKind, AttackResult, DamageInfo, DamageKind};
pub use resolver::DamageResolver;
