// Redis Connection Setup

use crate::queue_store::RedisQueueStore;
use async_trait::async_trait;
use crawlfeed_core::error::{FeedError, Result};
use crawlfeed_core::port::{QueueStore, Settings, StoreConnector};
use redis::aio::ConnectionManager;
use std::sync::Arc;

/// Redis connection URL for the shared queue store.
pub const REDIS_URL_SETTING: &str = "FEED_REDIS_URL";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

// Helper to convert redis::RedisError to FeedError with connection
// failures called out explicitly
pub(crate) fn map_redis_error(err: redis::RedisError) -> FeedError {
    if err.is_connection_refusal() || err.is_io_error() || err.is_timeout() {
        FeedError::Store(format!("connection error: {err}"))
    } else {
        FeedError::Store(err.to_string())
    }
}

/// Builds the queue store connection from settings. Retry policy, if
/// any, belongs to the connection manager, not to the controller.
pub struct RedisConnector;

#[async_trait]
impl StoreConnector for RedisConnector {
    async fn connect(&self, settings: &dyn Settings) -> Result<Arc<dyn QueueStore>> {
        let redis_url = settings
            .get(REDIS_URL_SETTING)
            .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());

        let client = redis::Client::open(redis_url.as_str()).map_err(map_redis_error)?;
        let manager = ConnectionManager::new(client).await.map_err(map_redis_error)?;

        Ok(Arc::new(RedisQueueStore::new(manager)))
    }
}
