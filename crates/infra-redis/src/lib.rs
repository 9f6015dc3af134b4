// crawlfeed Infrastructure - Redis Adapter
// Implements: QueueStore, StoreConnector

mod connection;
mod queue_store;

pub use connection::{RedisConnector, DEFAULT_REDIS_URL, REDIS_URL_SETTING};
pub use queue_store::RedisQueueStore;

// Note: redis::RedisError conversion is handled by a helper function
// (orphan rules prevent implementing From<redis::RedisError> for FeedError here)
