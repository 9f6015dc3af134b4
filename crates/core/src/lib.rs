// crawlfeed Core - Domain Logic & Ports
// NO infrastructure dependencies: the queue store, the engine, and the
// settings source all reach this crate through port traits.

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{FeedError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
