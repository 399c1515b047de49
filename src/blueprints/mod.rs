pub mod catalog;
pub mod instance;
pub mod schema;

pub use catalog::BodyCatalog;
pub use instance::instantiate;
pub use schema::{BodyTemplate, PartBlueprint};
