pub mod scheduler;
pub mod tick;

pub use scheduler::ActivationScheduler;
pub use tick::{Simulation, SimulationEvent};
