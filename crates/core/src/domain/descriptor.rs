// Queue Descriptor and Pop Strategy

use crate::error::{FeedError, Result};
use encoding_rs::Encoding;

/// Which atomic pop operation a worker runs against the shared queue.
///
/// Chosen once at bind time from configuration flags; set-mode takes
/// precedence over priority-mode when both are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopStrategy {
    /// Insertion-order list, popped from the front.
    Fifo,
    /// Unordered set, popped with store-native pop-N semantics.
    UnorderedSet,
    /// Score-ordered set, popped highest score first.
    PriorityDescending,
}

impl std::fmt::Display for PopStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PopStrategy::Fifo => write!(f, "fifo"),
            PopStrategy::UnorderedSet => write!(f, "set"),
            PopStrategy::PriorityDescending => write!(f, "priority"),
        }
    }
}

/// Resolved queue identity for one worker. Immutable after bind.
#[derive(Debug, Clone)]
pub struct QueueDescriptor {
    key: String,
    batch_size: usize,
    encoding: &'static Encoding,
}

impl QueueDescriptor {
    /// Build a descriptor, enforcing the bind-time invariants: the key is
    /// non-empty (after any placeholder substitution the caller performed)
    /// and the batch size is positive.
    pub fn new(key: impl Into<String>, batch_size: usize, encoding: &'static Encoding) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(FeedError::Configuration(
                "queue key must not be empty".to_string(),
            ));
        }
        if batch_size == 0 {
            return Err(FeedError::Configuration(
                "batch size must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            key,
            batch_size,
            encoding,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;

    #[test]
    fn rejects_empty_key() {
        let result = QueueDescriptor::new("   ", 16, UTF_8);
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let result = QueueDescriptor::new("worker:start_urls", 0, UTF_8);
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }

    #[test]
    fn keeps_resolved_fields() {
        let descriptor = QueueDescriptor::new("worker:start_urls", 16, UTF_8).unwrap();
        assert_eq!(descriptor.key(), "worker:start_urls");
        assert_eq!(descriptor.batch_size(), 16);
        assert_eq!(descriptor.encoding().name(), "UTF-8");
    }
}
