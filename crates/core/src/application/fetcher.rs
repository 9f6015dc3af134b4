// Batch Fetcher - one atomic pop per call, strategy fixed at bind time

use crate::domain::{PopStrategy, QueueDescriptor, RawItem};
use crate::error::Result;
use crate::port::QueueStore;
use std::sync::Arc;
use tracing::trace;

/// Executes the bound pop strategy against the shared queue store.
///
/// One call is one store round trip; the returned batch holds between 0
/// and `batch_size` items, all of which are already removed from the
/// store.
pub struct BatchFetcher {
    store: Arc<dyn QueueStore>,
    strategy: PopStrategy,
}

impl BatchFetcher {
    pub fn new(store: Arc<dyn QueueStore>, strategy: PopStrategy) -> Self {
        Self { store, strategy }
    }

    pub fn strategy(&self) -> PopStrategy {
        self.strategy
    }

    pub async fn fetch(&self, descriptor: &QueueDescriptor) -> Result<Vec<RawItem>> {
        let key = descriptor.key();
        let count = descriptor.batch_size();
        let items = match self.strategy {
            PopStrategy::Fifo => self.store.pop_front(key, count).await?,
            PopStrategy::UnorderedSet => self.store.pop_members(key, count).await?,
            PopStrategy::PriorityDescending => self.store.pop_highest(key, count).await?,
        };
        trace!(key, strategy = %self.strategy, popped = items.len(), "popped batch from queue");
        Ok(items)
    }
}
