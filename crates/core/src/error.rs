// Central Error Type for the Controller

use thiserror::Error;

/// Controller-level error type
#[derive(Error, Debug)]
pub enum FeedError {
    /// Raised at bind time; aborts worker startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A queue item could not be interpreted under the configured
    /// encoding. Fatal for the batch being drained.
    #[error("failed to decode queue item: {0}")]
    Decode(String),

    /// Propagated from the queue store; no retry happens at this layer.
    #[error("queue store error: {0}")]
    Store(String),

    #[error("engine error: {0}")]
    Engine(String),
}

/// Result type alias using FeedError
pub type Result<T> = std::result::Result<T, FeedError>;
