// Unit Decoder - turns raw queue items into schedulable work units

use crate::domain::{DecodeOutcome, RawItem, WorkUnit};
use crate::error::{FeedError, Result};
use encoding_rs::Encoding;
use serde::Deserialize;
use url::Url;

/// Turns one raw queue item into zero, one, or many work units.
///
/// A deployment substitutes its own implementation when queue items carry
/// richer records than a bare locator; see [`JsonRecordDecoder`].
///
/// Contract: bytes that cannot be interpreted under `encoding` are a
/// fatal [`FeedError::Decode`]; an item the decoder legitimately declines
/// (e.g. a malformed locator) is [`DecodeOutcome::Empty`], never an error.
pub trait UnitDecoder: Send + Sync {
    fn decode(&self, raw: &RawItem, encoding: &'static Encoding) -> Result<DecodeOutcome>;
}

/// Default decoder: the item is an encoded locator string, producing
/// exactly one work unit.
#[derive(Debug, Default)]
pub struct LocatorDecoder;

impl LocatorDecoder {
    fn decode_text<'a>(raw: &'a RawItem, encoding: &'static Encoding) -> Result<std::borrow::Cow<'a, str>> {
        let (text, had_errors) = encoding.decode_without_bom_handling(raw.as_bytes());
        if had_errors {
            return Err(FeedError::Decode(format!(
                "queue item is not valid {}",
                encoding.name()
            )));
        }
        Ok(text)
    }
}

impl UnitDecoder for LocatorDecoder {
    fn decode(&self, raw: &RawItem, encoding: &'static Encoding) -> Result<DecodeOutcome> {
        let text = Self::decode_text(raw, encoding)?;
        match Url::parse(text.trim()) {
            Ok(locator) => Ok(DecodeOutcome::One(WorkUnit::new(locator))),
            Err(_) => Ok(DecodeOutcome::Empty),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Record {
    url: String,
    #[serde(default)]
    meta: Option<serde_json::Value>,
}

impl Record {
    fn into_unit(self) -> Option<WorkUnit> {
        let locator = Url::parse(self.url.trim()).ok()?;
        Some(match self.meta {
            Some(meta) => WorkUnit::with_meta(locator, meta),
            None => WorkUnit::new(locator),
        })
    }
}

/// Structured-record decoder: each queue item is a JSON object
/// `{"url": ..., "meta": ...}` or an array of such objects, so a single
/// item may expand into many work units.
///
/// JSON text is UTF-8 by definition, so the configured queue encoding
/// does not apply here.
#[derive(Debug, Default)]
pub struct JsonRecordDecoder;

impl UnitDecoder for JsonRecordDecoder {
    fn decode(&self, raw: &RawItem, _encoding: &'static Encoding) -> Result<DecodeOutcome> {
        let value: serde_json::Value = serde_json::from_slice(raw.as_bytes())
            .map_err(|err| FeedError::Decode(format!("queue item is not valid JSON: {err}")))?;

        let records: Vec<Record> = match value {
            serde_json::Value::Array(entries) => entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect(),
            entry => serde_json::from_value(entry).map(|r| vec![r]).unwrap_or_default(),
        };

        let mut units: Vec<WorkUnit> = records
            .into_iter()
            .filter_map(Record::into_unit)
            .collect();

        Ok(match units.len() {
            0 => DecodeOutcome::Empty,
            1 => DecodeOutcome::One(units.remove(0)),
            _ => DecodeOutcome::Many(units),
        })
    }
}
