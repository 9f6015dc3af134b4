// Queue Store Port (Interface)

use crate::domain::RawItem;
use crate::error::Result;
use async_trait::async_trait;

/// Interface to the shared, durable work queue.
///
/// Every operation is an atomic read-and-remove: an item returned from any
/// of these calls has already been removed from the store by the time the
/// call resolves, so no two concurrent callers (local or remote) can
/// observe the same item. An empty queue yields an empty vec, never an
/// error.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Pop up to `count` items from the front of a list, in insertion
    /// order, as one indivisible operation.
    async fn pop_front(&self, key: &str, count: usize) -> Result<Vec<RawItem>>;

    /// Pop up to `count` arbitrary members from an unordered set using
    /// store-native pop-N semantics. No ordering guarantee.
    async fn pop_members(&self, key: &str, count: usize) -> Result<Vec<RawItem>>;

    /// Pop the `count` highest-scored members of a scored set in
    /// descending rank order, removing exactly those ranks, as one
    /// indivisible operation.
    async fn pop_highest(&self, key: &str, count: usize) -> Result<Vec<RawItem>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Shelves {
        lists: HashMap<String, VecDeque<RawItem>>,
        sets: HashMap<String, Vec<RawItem>>,
        scored: HashMap<String, Vec<(f64, RawItem)>>,
    }

    /// In-memory queue store. One mutex guards all collections, so each
    /// pop is atomic-and-exclusive exactly like the production store.
    #[derive(Default)]
    pub struct MemoryQueueStore {
        inner: Mutex<Shelves>,
    }

    impl MemoryQueueStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed the tail of a list, as a producer would.
        pub fn push_back(&self, key: &str, item: impl Into<RawItem>) {
            let mut shelves = self.inner.lock().unwrap();
            shelves
                .lists
                .entry(key.to_string())
                .or_default()
                .push_back(item.into());
        }

        /// Seed an unordered set member. Duplicates are ignored.
        pub fn add_member(&self, key: &str, item: impl Into<RawItem>) {
            let mut shelves = self.inner.lock().unwrap();
            let members = shelves.sets.entry(key.to_string()).or_default();
            let item = item.into();
            if !members.contains(&item) {
                members.push(item);
            }
        }

        /// Seed a scored-set member.
        pub fn add_scored(&self, key: &str, score: f64, item: impl Into<RawItem>) {
            let mut shelves = self.inner.lock().unwrap();
            shelves
                .scored
                .entry(key.to_string())
                .or_default()
                .push((score, item.into()));
        }

        pub fn list_len(&self, key: &str) -> usize {
            let shelves = self.inner.lock().unwrap();
            shelves.lists.get(key).map_or(0, VecDeque::len)
        }

        pub fn set_len(&self, key: &str) -> usize {
            let shelves = self.inner.lock().unwrap();
            shelves.sets.get(key).map_or(0, Vec::len)
        }

        pub fn scored_len(&self, key: &str) -> usize {
            let shelves = self.inner.lock().unwrap();
            shelves.scored.get(key).map_or(0, Vec::len)
        }
    }

    #[async_trait]
    impl QueueStore for MemoryQueueStore {
        async fn pop_front(&self, key: &str, count: usize) -> Result<Vec<RawItem>> {
            let mut shelves = self.inner.lock().unwrap();
            let Some(list) = shelves.lists.get_mut(key) else {
                return Ok(Vec::new());
            };
            let take = count.min(list.len());
            Ok(list.drain(..take).collect())
        }

        async fn pop_members(&self, key: &str, count: usize) -> Result<Vec<RawItem>> {
            let mut shelves = self.inner.lock().unwrap();
            let Some(members) = shelves.sets.get_mut(key) else {
                return Ok(Vec::new());
            };
            let take = count.min(members.len());
            Ok((0..take).filter_map(|_| members.pop()).collect())
        }

        async fn pop_highest(&self, key: &str, count: usize) -> Result<Vec<RawItem>> {
            let mut shelves = self.inner.lock().unwrap();
            let Some(members) = shelves.scored.get_mut(key) else {
                return Ok(Vec::new());
            };
            members.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
            let take = count.min(members.len());
            Ok(members.drain(..take).map(|(_, item)| item).collect())
        }
    }

}
