pub mod candles;
pub mod config;
pub mod error;
pub mod notifier;
pub mod signals;
pub mod ta;
pub mod watcher;

pub use error::{GoldError, GoldResult};
