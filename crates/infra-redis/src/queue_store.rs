// Redis QueueStore Implementation

use crate::connection::map_redis_error;
use async_trait::async_trait;
use crawlfeed_core::domain::RawItem;
use crawlfeed_core::error::Result;
use crawlfeed_core::port::QueueStore;
use redis::aio::ConnectionManager;
use tracing::trace;

/// Queue store backed by Redis collections.
///
/// Multi-step pops run inside a `MULTI`/`EXEC` pipeline so read and
/// removal are one indivisible operation at the store: a concurrent
/// drainer can never observe the read-but-not-yet-trimmed state.
pub struct RedisQueueStore {
    conn: ConnectionManager,
}

impl RedisQueueStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl QueueStore for RedisQueueStore {
    async fn pop_front(&self, key: &str, count: usize) -> Result<Vec<RawItem>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.clone();
        let (items,): (Vec<Vec<u8>>,) = redis::pipe()
            .atomic()
            .lrange(key, 0, count as isize - 1)
            .ltrim(key, count as isize, -1)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        trace!(key, popped = items.len(), "LRANGE+LTRIM batch");
        Ok(items.into_iter().map(RawItem::from).collect())
    }

    async fn pop_members(&self, key: &str, count: usize) -> Result<Vec<RawItem>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.clone();
        // SPOP with a count argument is natively atomic
        let items: Vec<Vec<u8>> = redis::cmd("SPOP")
            .arg(key)
            .arg(count)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        trace!(key, popped = items.len(), "SPOP batch");
        Ok(items.into_iter().map(RawItem::from).collect())
    }

    async fn pop_highest(&self, key: &str, count: usize) -> Result<Vec<RawItem>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.clone();
        let (items,): (Vec<Vec<u8>>,) = redis::pipe()
            .atomic()
            .zrevrange(key, 0, count as isize - 1)
            .zremrangebyrank(key, -(count as isize), -1)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        trace!(key, popped = items.len(), "ZREVRANGE+ZREMRANGEBYRANK batch");
        Ok(items.into_iter().map(RawItem::from).collect())
    }
}
