pub mod component;
pub mod part;

pub use component::{AnatomyComponent, PhysiologyConfig};
pub use part::{BodyPart, FunctionTag, LimbKind, OrganKind, PartKind};
