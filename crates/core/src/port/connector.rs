// Store Connector Port (connection factory)

use crate::error::Result;
use crate::port::queue_store::QueueStore;
use crate::port::settings::Settings;
use async_trait::async_trait;
use std::sync::Arc;

/// Factory seam for obtaining the queue store connection from settings.
///
/// Transport and connection management belong to the implementing
/// adapter; the binder only calls this once per worker instance.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, settings: &dyn Settings) -> Result<Arc<dyn QueueStore>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::port::queue_store::mocks::MemoryQueueStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Connector handing out a shared in-memory store and counting how
    /// many times it was asked to connect.
    pub struct CountingConnector {
        store: Arc<MemoryQueueStore>,
        connects: AtomicUsize,
    }

    impl CountingConnector {
        pub fn new(store: Arc<MemoryQueueStore>) -> Self {
            Self {
                store,
                connects: AtomicUsize::new(0),
            }
        }

        pub fn connect_count(&self) -> usize {
            self.connects.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StoreConnector for CountingConnector {
        async fn connect(&self, _settings: &dyn Settings) -> Result<Arc<dyn QueueStore>> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(self.store.clone())
        }
    }
}
