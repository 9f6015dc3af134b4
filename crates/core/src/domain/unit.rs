// Raw Queue Items and Work Units

use serde::{Deserialize, Serialize};
use url::Url;

/// An opaque byte sequence popped from the shared queue.
///
/// Ownership transfers from the store on pop: by the time a `RawItem`
/// exists, the store no longer holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawItem(Vec<u8>);

impl RawItem {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for RawItem {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for RawItem {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for RawItem {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

/// A schedulable unit of work derived from a raw queue item.
///
/// Owned by the engine once handed over; this crate never retains one
/// after scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkUnit {
    pub locator: Url,
    /// Optional structured payload carried alongside the locator, for
    /// decoders that read richer records than a bare URL.
    pub meta: Option<serde_json::Value>,
}

impl WorkUnit {
    pub fn new(locator: Url) -> Self {
        Self {
            locator,
            meta: None,
        }
    }

    pub fn with_meta(locator: Url, meta: serde_json::Value) -> Self {
        Self {
            locator,
            meta: Some(meta),
        }
    }
}

/// Result of decoding one raw item: zero, one, or many work units.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// The decoder legitimately declined to produce a unit.
    Empty,
    One(WorkUnit),
    Many(Vec<WorkUnit>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_item_round_trips_bytes() {
        let item = RawItem::from("https://example.com/");
        assert_eq!(item.as_bytes(), b"https://example.com/");
        assert_eq!(item.into_bytes(), b"https://example.com/".to_vec());
    }

    #[test]
    fn work_unit_carries_meta() {
        let locator = Url::parse("https://example.com/").unwrap();
        let unit = WorkUnit::with_meta(locator.clone(), serde_json::json!({"depth": 2}));
        assert_eq!(unit.locator, locator);
        assert_eq!(unit.meta, Some(serde_json::json!({"depth": 2})));
    }
}
