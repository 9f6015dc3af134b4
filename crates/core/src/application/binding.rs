// Feed Binding - one-time setup when a worker attaches to its engine

use crate::application::constants::{
    BATCH_SIZE_SETTING, DEFAULT_ENCODING, DEFAULT_QUEUE_KEY_TEMPLATE, ENCODING_SETTING,
    QUEUE_AS_PRIORITY_SETTING, QUEUE_AS_SET_SETTING, QUEUE_KEY_SETTING, WORKER_NAME_TOKEN,
};
use crate::application::decoder::{LocatorDecoder, UnitDecoder};
use crate::application::fetcher::BatchFetcher;
use crate::application::idle::IdleBridge;
use crate::application::refill::RefillController;
use crate::domain::{PopStrategy, QueueDescriptor};
use crate::error::{FeedError, Result};
use crate::port::{CrawlEngine, Settings, StoreConnector};
use encoding_rs::Encoding;
use std::sync::Arc;
use tracing::info;

struct Bound {
    controller: Arc<RefillController>,
}

/// Per-worker binding state. Instance overrides win over settings; the
/// bound state lives on this instance only, never on anything shared
/// between workers.
pub struct FeedBinding {
    worker: String,
    queue_key: Option<String>,
    batch_size: Option<usize>,
    encoding: Option<String>,
    decoder: Option<Arc<dyn UnitDecoder>>,
    set_mode_default: bool,
    bound: Option<Bound>,
}

impl FeedBinding {
    pub fn new(worker: impl Into<String>) -> Self {
        Self {
            worker: worker.into(),
            queue_key: None,
            batch_size: None,
            encoding: None,
            decoder: None,
            set_mode_default: false,
            bound: None,
        }
    }

    /// Override the queue key template for this worker.
    pub fn queue_key(mut self, key: impl Into<String>) -> Self {
        self.queue_key = Some(key.into());
        self
    }

    /// Override the per-fetch batch size for this worker.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Override the queue item encoding for this worker.
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Substitute the unit decoder for this worker.
    pub fn decoder(mut self, decoder: Arc<dyn UnitDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Default to the unordered-set strategy when the settings do not say
    /// otherwise. Broad-crawl worker variants set this to true.
    pub fn set_mode_by_default(mut self, yes: bool) -> Self {
        self.set_mode_default = yes;
        self
    }

    pub fn worker(&self) -> &str {
        &self.worker
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn controller(&self) -> Option<&Arc<RefillController>> {
        self.bound.as_ref().map(|b| &b.controller)
    }

    /// Resolve configuration, open the store connection, and register the
    /// idle bridge with the engine.
    ///
    /// Idempotent: a second call on a bound instance returns immediately
    /// without reconnecting or re-registering.
    pub async fn bind(
        &mut self,
        engine: Arc<dyn CrawlEngine>,
        settings: &dyn Settings,
        connector: &dyn StoreConnector,
    ) -> Result<()> {
        if self.bound.is_some() {
            return Ok(());
        }

        let template = self
            .queue_key
            .clone()
            .or_else(|| settings.get(QUEUE_KEY_SETTING))
            .unwrap_or_else(|| DEFAULT_QUEUE_KEY_TEMPLATE.to_string());
        let key = template.replace(WORKER_NAME_TOKEN, &self.worker);
        if key.trim().is_empty() {
            return Err(FeedError::Configuration(
                "queue key must not be empty after worker-name substitution".to_string(),
            ));
        }

        let batch_size = match self.batch_size {
            Some(batch) => batch as i64,
            None => match settings.get_int(BATCH_SIZE_SETTING)? {
                Some(batch) => batch,
                None => engine.concurrency() as i64,
            },
        };
        let batch_size = usize::try_from(batch_size)
            .ok()
            .filter(|batch| *batch > 0)
            .ok_or_else(|| {
                FeedError::Configuration(format!(
                    "batch size must be a positive integer, got {batch_size}"
                ))
            })?;

        let label = self
            .encoding
            .clone()
            .or_else(|| settings.get(ENCODING_SETTING))
            .unwrap_or_else(|| DEFAULT_ENCODING.to_string());
        let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
            FeedError::Configuration(format!("unknown encoding label '{label}'"))
        })?;

        let descriptor = QueueDescriptor::new(key, batch_size, encoding)?;

        let store = connector.connect(settings).await?;

        let as_set = settings
            .get_bool(QUEUE_AS_SET_SETTING)?
            .unwrap_or(self.set_mode_default);
        let as_priority = settings.get_bool(QUEUE_AS_PRIORITY_SETTING)?.unwrap_or(false);
        // Set-mode takes precedence when both flags are configured.
        let strategy = if as_set {
            PopStrategy::UnorderedSet
        } else if as_priority {
            PopStrategy::PriorityDescending
        } else {
            PopStrategy::Fifo
        };

        info!(
            worker = %self.worker,
            key = descriptor.key(),
            batch_size = descriptor.batch_size(),
            encoding = descriptor.encoding().name(),
            %strategy,
            "reading start urls from shared queue"
        );

        let fetcher = BatchFetcher::new(store, strategy);
        let decoder = self
            .decoder
            .clone()
            .unwrap_or_else(|| Arc::new(LocatorDecoder));
        let controller = Arc::new(RefillController::new(
            descriptor,
            fetcher,
            decoder,
            engine.clone(),
            self.worker.clone(),
        ));

        engine.connect_idle(Arc::new(IdleBridge::new(controller.clone())));

        self.bound = Some(Bound { controller });
        Ok(())
    }

    /// Schedule one batch at worker start, before any idle notification
    /// has fired.
    pub async fn schedule_startup(&self) -> Result<usize> {
        let bound = self.bound.as_ref().ok_or_else(|| {
            FeedError::Configuration("worker is not bound to an engine".to_string())
        })?;
        bound.controller.schedule_next_units().await
    }
}
