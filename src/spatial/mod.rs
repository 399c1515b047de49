pub mod grid;
pub mod hit_location;

pub use grid::{RayHit, SpatialGrid};
pub use hit_location::determine_hit_location;
