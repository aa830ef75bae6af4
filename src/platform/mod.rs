//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (clock readings, calendar dates)
//! - Logging setup
//! - Storage (LocalStorage on web, data directory on native)

pub mod storage;
pub mod time;

pub use time::{now_ms, today};

use crate::persistence::RecordStore;

/// Route `log` output to the platform sink
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Route `log` output to the platform sink
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// The record store used for leaderboard and settings on this platform
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn RecordStore> {
    Box::new(storage::LocalStorage::new())
}

/// The record store used for leaderboard and settings on this platform
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn RecordStore> {
    Box::new(crate::persistence::FileStore::new(storage::data_dir()))
}
