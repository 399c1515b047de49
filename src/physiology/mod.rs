pub mod processor;

pub use processor::PhysiologyProcessor;
