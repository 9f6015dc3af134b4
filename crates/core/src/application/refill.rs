// Refill Controller - one bounded fetch-and-decode cycle per invocation

use crate::application::decoder::UnitDecoder;
use crate::application::fetcher::BatchFetcher;
use crate::domain::{DecodeOutcome, QueueDescriptor, RawItem, WorkUnit};
use crate::error::Result;
use crate::port::CrawlEngine;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// Orchestrates fetcher and decoder into a lazy sequence of work units
/// and hands them to the engine.
pub struct RefillController {
    descriptor: QueueDescriptor,
    fetcher: BatchFetcher,
    decoder: Arc<dyn UnitDecoder>,
    engine: Arc<dyn CrawlEngine>,
    worker: String,
}

impl RefillController {
    pub fn new(
        descriptor: QueueDescriptor,
        fetcher: BatchFetcher,
        decoder: Arc<dyn UnitDecoder>,
        engine: Arc<dyn CrawlEngine>,
        worker: impl Into<String>,
    ) -> Self {
        Self {
            descriptor,
            fetcher,
            decoder,
            engine,
            worker: worker.into(),
        }
    }

    pub fn descriptor(&self) -> &QueueDescriptor {
        &self.descriptor
    }

    pub fn worker(&self) -> &str {
        &self.worker
    }

    /// Perform exactly one fetch against the store and return a lazy,
    /// finite sequence of the work units decoded from it.
    ///
    /// Decoding happens inside the iterator, so skip logging interleaves
    /// with discovery. The sequence is not resumable mid-stream; call
    /// `drain` again for a fresh batch.
    pub async fn drain(&self) -> Result<Drain<'_>> {
        let items = self.fetcher.fetch(&self.descriptor).await?;
        Ok(Drain {
            raw: items.into_iter(),
            pending: VecDeque::new(),
            decoder: self.decoder.as_ref(),
            descriptor: &self.descriptor,
            found: 0,
            summarized: false,
        })
    }

    /// Consume one full drain, handing every produced unit to the engine
    /// with the originating worker name. Returns how many were scheduled.
    ///
    /// This is the only place work units cross into engine ownership.
    pub async fn schedule_next_units(&self) -> Result<usize> {
        let mut drained = self.drain().await?;
        let mut scheduled = 0usize;
        while let Some(next) = drained.next() {
            let unit = next?;
            trace!(url = %unit.locator, worker = %self.worker, "scheduling work unit");
            self.engine.crawl(unit, &self.worker).await?;
            scheduled += 1;
        }
        Ok(scheduled)
    }
}

/// Lazy view over one fetched batch. Yields `Err` once and stops early if
/// an item cannot be decoded; rejected items are logged and skipped.
pub struct Drain<'a> {
    raw: std::vec::IntoIter<RawItem>,
    pending: VecDeque<WorkUnit>,
    decoder: &'a dyn UnitDecoder,
    descriptor: &'a QueueDescriptor,
    found: usize,
    summarized: bool,
}

impl Drain<'_> {
    /// Units emitted so far in this session.
    pub fn found(&self) -> usize {
        self.found
    }
}

impl Iterator for Drain<'_> {
    type Item = Result<WorkUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(unit) = self.pending.pop_front() {
            self.found += 1;
            return Some(Ok(unit));
        }

        for raw in self.raw.by_ref() {
            match self.decoder.decode(&raw, self.descriptor.encoding()) {
                Err(err) => return Some(Err(err)),
                Ok(DecodeOutcome::Empty) => {
                    debug!(
                        item = %String::from_utf8_lossy(raw.as_bytes()),
                        "work unit not made from queue item"
                    );
                }
                Ok(DecodeOutcome::One(unit)) => {
                    self.found += 1;
                    return Some(Ok(unit));
                }
                Ok(DecodeOutcome::Many(units)) => {
                    self.pending.extend(units);
                    // Many([]) behaves like Empty
                    if let Some(unit) = self.pending.pop_front() {
                        self.found += 1;
                        return Some(Ok(unit));
                    }
                }
            }
        }

        if !self.summarized {
            self.summarized = true;
            if self.found > 0 {
                debug!(
                    count = self.found,
                    key = self.descriptor.key(),
                    "read work units from queue"
                );
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::decoder::{JsonRecordDecoder, LocatorDecoder};
    use crate::domain::PopStrategy;
    use crate::error::FeedError;
    use crate::port::engine::mocks::MockEngine;
    use crate::port::queue_store::mocks::MemoryQueueStore;
    use encoding_rs::UTF_8;

    const KEY: &str = "worker:start_urls";

    fn controller(
        store: Arc<MemoryQueueStore>,
        engine: Arc<MockEngine>,
        decoder: Arc<dyn UnitDecoder>,
        batch_size: usize,
    ) -> RefillController {
        let descriptor = QueueDescriptor::new(KEY, batch_size, UTF_8).unwrap();
        let fetcher = BatchFetcher::new(store, PopStrategy::Fifo);
        RefillController::new(descriptor, fetcher, decoder, engine, "worker")
    }

    #[tokio::test]
    async fn drain_yields_units_in_queue_order() {
        let store = Arc::new(MemoryQueueStore::new());
        store.push_back(KEY, "https://example.com/a");
        store.push_back(KEY, "https://example.com/b");

        let engine = Arc::new(MockEngine::new(4));
        let controller = controller(store, engine, Arc::new(LocatorDecoder), 8);

        let drained = controller.drain().await.unwrap();
        let units: Vec<WorkUnit> = drained.map(Result::unwrap).collect();
        let locators: Vec<&str> = units.iter().map(|u| u.locator.as_str()).collect();
        assert_eq!(locators, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[tokio::test]
    async fn rejected_items_are_skipped_not_fatal() {
        let store = Arc::new(MemoryQueueStore::new());
        store.push_back(KEY, "https://example.com/a");
        store.push_back(KEY, "definitely not a locator");
        store.push_back(KEY, "https://example.com/b");

        let engine = Arc::new(MockEngine::new(4));
        let controller = controller(store, engine.clone(), Arc::new(LocatorDecoder), 8);

        let scheduled = controller.schedule_next_units().await.unwrap();
        assert_eq!(scheduled, 2);
        assert_eq!(engine.crawl_count(), 2);
    }

    #[tokio::test]
    async fn undecodable_item_aborts_the_batch() {
        let store = Arc::new(MemoryQueueStore::new());
        store.push_back(KEY, "https://example.com/a");
        store.push_back(KEY, RawItem::new(vec![0xff, 0xfe]));

        let engine = Arc::new(MockEngine::new(4));
        let controller = controller(store, engine.clone(), Arc::new(LocatorDecoder), 8);

        let result = controller.schedule_next_units().await;
        assert!(matches!(result, Err(FeedError::Decode(_))));
        // The first unit was already handed over before the bad item.
        assert_eq!(engine.crawl_count(), 1);
    }

    #[tokio::test]
    async fn many_outcome_counts_once_per_element() {
        let store = Arc::new(MemoryQueueStore::new());
        store.push_back(
            KEY,
            r#"[{"url": "https://example.com/a"}, {"url": "https://example.com/b"}, {"url": "https://example.com/c"}]"#,
        );

        let engine = Arc::new(MockEngine::new(4));
        let controller = controller(store, engine.clone(), Arc::new(JsonRecordDecoder), 8);

        let mut drained = controller.drain().await.unwrap();
        let mut units = Vec::new();
        while let Some(next) = drained.next() {
            units.push(next.unwrap());
        }
        assert_eq!(units.len(), 3);
        assert_eq!(drained.found(), 3);
    }

    #[tokio::test]
    async fn draining_an_empty_queue_twice_is_fine() {
        let store = Arc::new(MemoryQueueStore::new());
        let engine = Arc::new(MockEngine::new(4));
        let controller = controller(store, engine, Arc::new(LocatorDecoder), 8);

        for _ in 0..2 {
            let scheduled = controller.schedule_next_units().await.unwrap();
            assert_eq!(scheduled, 0);
        }
    }

    #[tokio::test]
    async fn schedule_respects_batch_size() {
        let store = Arc::new(MemoryQueueStore::new());
        for i in 0..5 {
            store.push_back(KEY, format!("https://example.com/{i}").as_str());
        }

        let engine = Arc::new(MockEngine::new(4));
        let controller = controller(store.clone(), engine.clone(), Arc::new(LocatorDecoder), 2);

        assert_eq!(controller.schedule_next_units().await.unwrap(), 2);
        assert_eq!(store.list_len(KEY), 3);
        assert_eq!(controller.schedule_next_units().await.unwrap(), 2);
        assert_eq!(controller.schedule_next_units().await.unwrap(), 1);
        assert_eq!(engine.crawl_count(), 5);
    }

    #[tokio::test]
    async fn engine_errors_propagate() {
        let store = Arc::new(MemoryQueueStore::new());
        store.push_back(KEY, "https://example.com/a");

        let engine = Arc::new(MockEngine::new(4));
        engine.fail_crawls();
        let controller = controller(store, engine, Arc::new(LocatorDecoder), 8);

        let result = controller.schedule_next_units().await;
        assert!(matches!(result, Err(FeedError::Engine(_))));
    }
}
