// Port Layer - Interfaces for external collaborators

pub mod connector;
pub mod engine;
pub mod queue_store;
pub mod settings;

// Re-exports
pub use connector::StoreConnector;
pub use engine::{CrawlEngine, IdleHandler, IdleOutcome};
pub use queue_store::QueueStore;
pub use settings::{MapSettings, Settings};
