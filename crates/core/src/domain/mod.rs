// Domain Layer - Pure data model, no behavior against external systems

pub mod descriptor;
pub mod unit;

// Re-exports
pub use descriptor::{PopStrategy, QueueDescriptor};
pub use unit::{DecodeOutcome, RawItem, WorkUnit};
