// Crawl Engine Port (Interface)

use crate::domain::WorkUnit;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Answer a worker gives the engine from an idle notification.
///
/// `Continue` vetoes shutdown: the engine must keep running even though it
/// has no local work right now. Termination is an external supervisory
/// decision, not something the idle path ever decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleOutcome {
    Continue,
    AllowShutdown,
}

/// Callback registered on the engine's idle-notification channel.
#[async_trait]
pub trait IdleHandler: Send + Sync {
    async fn on_idle(&self) -> IdleOutcome;
}

/// The surface this controller consumes from the crawl engine.
///
/// The engine owns scheduling, fetching, and its own lifecycle; this
/// crate only hands it work and listens for its idle signal.
#[async_trait]
pub trait CrawlEngine: Send + Sync {
    /// Accept one unit of work, associated with the originating worker.
    async fn crawl(&self, unit: WorkUnit, worker: &str) -> Result<()>;

    /// The engine's own concurrency setting, used as the batch-size
    /// fallback when none is configured.
    fn concurrency(&self) -> usize;

    /// Register an idle callback. Expected to be called once per worker
    /// lifetime; the engine invokes the handler whenever it runs out of
    /// local work.
    fn connect_idle(&self, handler: Arc<dyn IdleHandler>);
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::FeedError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Mock engine recording scheduled units and idle registrations.
    pub struct MockEngine {
        concurrency: usize,
        fail_crawl: AtomicBool,
        crawled: Mutex<Vec<(WorkUnit, String)>>,
        idle_handlers: Mutex<Vec<Arc<dyn IdleHandler>>>,
    }

    impl MockEngine {
        pub fn new(concurrency: usize) -> Self {
            Self {
                concurrency,
                fail_crawl: AtomicBool::new(false),
                crawled: Mutex::new(Vec::new()),
                idle_handlers: Mutex::new(Vec::new()),
            }
        }

        /// Make subsequent `crawl` calls fail.
        pub fn fail_crawls(&self) {
            self.fail_crawl.store(true, Ordering::SeqCst);
        }

        pub fn crawled(&self) -> Vec<(WorkUnit, String)> {
            self.crawled.lock().unwrap().clone()
        }

        pub fn crawl_count(&self) -> usize {
            self.crawled.lock().unwrap().len()
        }

        pub fn idle_registrations(&self) -> usize {
            self.idle_handlers.lock().unwrap().len()
        }

        /// Deliver an idle notification to every registered handler, the
        /// way the engine's own loop would, and collect the outcomes.
        pub async fn fire_idle(&self) -> Vec<IdleOutcome> {
            let handlers: Vec<Arc<dyn IdleHandler>> =
                self.idle_handlers.lock().unwrap().clone();
            let mut outcomes = Vec::with_capacity(handlers.len());
            for handler in handlers {
                outcomes.push(handler.on_idle().await);
            }
            outcomes
        }
    }

    #[async_trait]
    impl CrawlEngine for MockEngine {
        async fn crawl(&self, unit: WorkUnit, worker: &str) -> Result<()> {
            if self.fail_crawl.load(Ordering::SeqCst) {
                return Err(FeedError::Engine("engine rejected work unit".to_string()));
            }
            self.crawled
                .lock()
                .unwrap()
                .push((unit, worker.to_string()));
            Ok(())
        }

        fn concurrency(&self) -> usize {
            self.concurrency
        }

        fn connect_idle(&self, handler: Arc<dyn IdleHandler>) {
            self.idle_handlers.lock().unwrap().push(handler);
        }
    }
}
