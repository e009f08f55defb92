//! File logging for debug sessions.
//!
//! The terminal is in raw mode while the picker runs and stdout carries the
//! confirmed result, so log records go to `<cache_dir>/distui/distui.log`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::cache::{CacheManager, LOG_FILE};

/// Environment variable holding a tracing filter; wins over the config's `log_level`
pub const LOG_ENV: &str = "DISTUI_LOG";

/// Filter from `DISTUI_LOG` when set and valid, else from `fallback`
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the cache log file (appending).
/// Returns the log path. A second call leaves the first subscriber in place.
pub fn init(cache: &CacheManager, level: &str) -> Result<PathBuf> {
    cache.ensure_cache_dir()?;
    let path = cache.cache_file(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_level_used_for_invalid_directive() {
        // An unparsable fallback degrades to "info" instead of failing
        let filter = env_filter("distui=[");
        assert!(!filter.to_string().is_empty());
    }
}
