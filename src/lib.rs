//! Marrow - anatomical damage and physiology simulation

pub mod anatomy;
pub mod blueprints;
pub mod combat;
pub mod core;
pub mod ecs;
pub mod entity;
pub mod physiology;
pub mod simulation;
pub mod spatial;
