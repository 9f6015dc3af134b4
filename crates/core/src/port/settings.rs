// Settings Port (engine-owned configuration, read-only here)

use crate::error::{FeedError, Result};
use std::collections::HashMap;

/// Read-only view of the configuration owned by the engine.
///
/// Only `get` is required; the typed helpers treat a present-but-invalid
/// value as a configuration error, never as a runtime error.
pub trait Settings: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<i64>().map(Some).map_err(|_| {
                FeedError::Configuration(format!(
                    "setting '{key}' must be an integer, got '{raw}'"
                ))
            }),
        }
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(FeedError::Configuration(format!(
                    "setting '{key}' must be a boolean, got '{raw}'"
                ))),
            },
        }
    }
}

/// Plain key-value settings backed by a map.
#[derive(Debug, Default, Clone)]
pub struct MapSettings {
    values: HashMap<String, String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl Settings for MapSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
