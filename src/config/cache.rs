//! 캐시 저장소 설정 모듈.

use std::path::PathBuf;

use crate::cache::{CacheBackend, DiskCache, MemoryCache};
use crate::config::env::AppConfig;
use crate::error::AppResult;

/// Where memoized results live for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub enabled: bool,
    pub dir: PathBuf,
    pub ttl_secs: u64,
}

impl From<&AppConfig> for CacheSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            enabled: config.cache_enabled,
            dir: config.cache_dir.clone(),
            ttl_secs: config.cache_ttl_secs,
        }
    }
}

/// Opens the cache backend for this run.
///
/// A disabled cache still memoizes within the process.
///
/// # Errors
///
/// Returns an error if the cache directory cannot be created
pub fn init_cache(settings: &CacheSettings) -> AppResult<Box<dyn CacheBackend>> {
    if !settings.enabled {
        tracing::info!("Disk cache disabled, memoizing in memory only");
        return Ok(Box::new(MemoryCache::new()));
    }

    let cache = DiskCache::open(&settings.dir)?;
    tracing::info!(
        dir = %settings.dir.display(),
        ttl_secs = settings.ttl_secs,
        "Disk cache opened"
    );

    Ok(Box::new(cache))
}
