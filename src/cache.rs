use color_eyre::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File the debug log is written to, inside the cache directory
pub const LOG_FILE: &str = "distui.log";

/// Registry of known cache files
const CACHE_FILES: &[&str] = &[LOG_FILE];

/// Manages cache directory and cache file operations
#[derive(Clone)]
pub struct CacheManager {
    pub(crate) cache_dir: PathBuf,
}

impl CacheManager {
    /// Create a new CacheManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine cache directory"))?
            .join(app_name);

        Ok(Self { cache_dir })
    }

    /// CacheManager rooted at `cache_dir` (used by tests)
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get path to a specific cache file
    pub fn cache_file(&self, filename: &str) -> PathBuf {
        self.cache_dir.join(filename)
    }

    pub fn ensure_cache_dir(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Clear all registered cache files; returns how many were removed
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for filename in CACHE_FILES {
            let file_path = self.cache_file(filename);
            if file_path.exists() {
                match fs::remove_file(&file_path) {
                    Ok(()) => removed += 1,
                    Err(e) => {
                        tracing::warn!(file = filename, error = %e, "could not remove cache file")
                    }
                }
            }
        }

        Ok(removed)
    }
}
