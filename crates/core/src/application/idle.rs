// Idle Bridge - refill on idle, veto shutdown unconditionally

use crate::application::refill::RefillController;
use crate::port::{IdleHandler, IdleOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, trace};

/// Listens on the engine's idle notification and refills it from the
/// shared queue.
///
/// The answer is always [`IdleOutcome::Continue`], even when the queue
/// was empty: new items may arrive after this worker goes idle, so
/// absence-of-work-right-now is never absence-of-work-ever. Termination
/// belongs to an external supervisory decision.
pub struct IdleBridge {
    controller: Arc<RefillController>,
    // Single-flight: engines that serialize idle callbacks never contend
    // here; for ones that don't, an overlapping notification is a no-op.
    inflight: Mutex<()>,
}

impl IdleBridge {
    pub fn new(controller: Arc<RefillController>) -> Self {
        Self {
            controller,
            inflight: Mutex::new(()),
        }
    }
}

#[async_trait]
impl IdleHandler for IdleBridge {
    async fn on_idle(&self) -> IdleOutcome {
        let Ok(_guard) = self.inflight.try_lock() else {
            trace!("refill already in flight, ignoring idle notification");
            return IdleOutcome::Continue;
        };

        match self.controller.schedule_next_units().await {
            Ok(0) => trace!(
                key = self.controller.descriptor().key(),
                "queue empty on idle, keeping worker alive"
            ),
            Ok(scheduled) => debug!(
                scheduled,
                key = self.controller.descriptor().key(),
                "refilled engine from queue"
            ),
            // Nothing to propagate to from inside the engine's idle
            // callback; the crawl must not be interrupted.
            Err(err) => error!(%err, "refill failed during idle"),
        }

        IdleOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::decoder::LocatorDecoder;
    use crate::application::fetcher::BatchFetcher;
    use crate::domain::{PopStrategy, QueueDescriptor};
    use crate::port::engine::mocks::MockEngine;
    use crate::port::queue_store::mocks::MemoryQueueStore;
    use encoding_rs::UTF_8;

    const KEY: &str = "worker:start_urls";

    fn bridge(store: Arc<MemoryQueueStore>, engine: Arc<MockEngine>) -> IdleBridge {
        let descriptor = QueueDescriptor::new(KEY, 4, UTF_8).unwrap();
        let fetcher = BatchFetcher::new(store, PopStrategy::Fifo);
        let controller = Arc::new(RefillController::new(
            descriptor,
            fetcher,
            Arc::new(LocatorDecoder),
            engine,
            "worker",
        ));
        IdleBridge::new(controller)
    }

    #[tokio::test]
    async fn idle_on_empty_queue_still_vetoes_shutdown() {
        let store = Arc::new(MemoryQueueStore::new());
        let engine = Arc::new(MockEngine::new(4));
        let bridge = bridge(store, engine.clone());

        assert_eq!(bridge.on_idle().await, IdleOutcome::Continue);
        assert_eq!(engine.crawl_count(), 0);
    }

    #[tokio::test]
    async fn idle_refills_the_engine() {
        let store = Arc::new(MemoryQueueStore::new());
        store.push_back(KEY, "https://example.com/a");
        store.push_back(KEY, "https://example.com/b");

        let engine = Arc::new(MockEngine::new(4));
        let bridge = bridge(store, engine.clone());

        assert_eq!(bridge.on_idle().await, IdleOutcome::Continue);
        assert_eq!(engine.crawl_count(), 2);
    }

    #[tokio::test]
    async fn refill_errors_do_not_escape_the_callback() {
        let store = Arc::new(MemoryQueueStore::new());
        store.push_back(KEY, "https://example.com/a");

        let engine = Arc::new(MockEngine::new(4));
        engine.fail_crawls();
        let bridge = bridge(store, engine);

        assert_eq!(bridge.on_idle().await, IdleOutcome::Continue);
    }
}
