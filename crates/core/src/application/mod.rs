// Application Layer - The queue-draining and refill components

pub mod binding;
pub mod constants;
pub mod decoder;
pub mod fetcher;
pub mod idle;
pub mod refill;

// Re-exports
pub use binding::FeedBinding;
pub use decoder::{JsonRecordDecoder, LocatorDecoder, UnitDecoder};
pub use fetcher::BatchFetcher;
pub use idle::IdleBridge;
pub use refill::{Drain, RefillController};
