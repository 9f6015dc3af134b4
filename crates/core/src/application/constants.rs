// Recognized Settings Keys and Defaults

/// Queue key template; `{name}` is substituted with the worker name once
/// at bind time.
pub const QUEUE_KEY_SETTING: &str = "FEED_QUEUE_KEY";

/// Items per fetch. Falls back to the engine's concurrency setting.
pub const BATCH_SIZE_SETTING: &str = "FEED_BATCH_SIZE";

/// Select the unordered-set pop strategy.
pub const QUEUE_AS_SET_SETTING: &str = "FEED_QUEUE_AS_SET";

/// Select the priority (score-descending) pop strategy.
pub const QUEUE_AS_PRIORITY_SETTING: &str = "FEED_QUEUE_AS_PRIORITY";

/// Byte-to-text decoding applied to raw queue items.
pub const ENCODING_SETTING: &str = "FEED_ENCODING";

pub const DEFAULT_QUEUE_KEY_TEMPLATE: &str = "{name}:start_urls";
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Placeholder resolved against the worker name at bind time.
pub const WORKER_NAME_TOKEN: &str = "{name}";
