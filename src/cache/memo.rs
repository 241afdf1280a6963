//! Function-call memoization on top of a `CacheBackend`.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cache::backend::CacheBackend;
use crate::cache::key::{cache_key, FunctionId};
use crate::error::AppResult;

/// Stored form of a memoized result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<R> {
    pub function: String,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub value: R,
}

/// Hit/miss counters for one memoized function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub const fn calls(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Whether an entry written at `created_at` is stale at `now`.
///
/// A `ttl_secs` of zero never expires. Entries dated in the future are fresh.
pub fn is_expired(created_at: DateTime<Utc>, now: DateTime<Utc>, ttl_secs: u64) -> bool {
    if ttl_secs == 0 {
        return false;
    }
    u64::try_from((now - created_at).num_seconds()).is_ok_and(|age| age > ttl_secs)
}

/// A memoized function: results are looked up by argument hash before computing.
pub struct Memoized<B: CacheBackend> {
    function: FunctionId,
    backend: B,
    ttl_secs: u64,
    stats: CacheStats,
}

impl<B: CacheBackend> Memoized<B> {
    pub const fn new(function: FunctionId, backend: B) -> Self {
        Self {
            function,
            backend,
            ttl_secs: 0,
            stats: CacheStats { hits: 0, misses: 0 },
        }
    }

    /// Sets the entry lifetime in seconds (`0` disables expiry).
    #[must_use]
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    pub const fn function(&self) -> &FunctionId {
        &self.function
    }

    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns the cached result for `args`, or runs `compute` and stores it.
    ///
    /// Cache read and write failures are logged and never fail the call.
    pub fn call<A, R, F>(&mut self, args: &A, compute: F) -> AppResult<R>
    where
        A: Serialize + ?Sized,
        R: Serialize + DeserializeOwned,
        F: FnOnce(&A) -> R,
    {
        let key = cache_key(&self.function, args)?;

        if let Some(value) = self.lookup::<R>(&key) {
            self.stats.hits += 1;
            return Ok(value);
        }

        self.stats.misses += 1;
        tracing::debug!(cache_key = %key, "running {}", self.function.name);
        let value = compute(args);
        self.store(&key, &value);

        Ok(value)
    }

    fn lookup<R: DeserializeOwned>(&self, key: &str) -> Option<R> {
        let bytes = match self.backend.get(&self.function.name, key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(cache_key = %key, error = %e, "Cache read failed");
                return None;
            }
        };

        match rmp_serde::from_slice::<CacheEntry<R>>(&bytes) {
            Ok(entry)
                if entry.function != self.function.name
                    || entry.version != self.function.version =>
            {
                tracing::warn!(cache_key = %key, "Cache entry belongs to another function");
                None
            }
            Ok(entry) if is_expired(entry.created_at, Utc::now(), self.ttl_secs) => {
                tracing::debug!(cache_key = %key, "Cache entry expired");
                None
            }
            Ok(entry) => Some(entry.value),
            Err(e) => {
                tracing::warn!(cache_key = %key, error = %e, "Discarding corrupt cache entry");
                None
            }
        }
    }

    fn store<R: Serialize>(&mut self, key: &str, value: &R) {
        let entry = CacheEntry {
            function: self.function.name.clone(),
            version: self.function.version,
            created_at: Utc::now(),
            value,
        };

        match rmp_serde::to_vec(&entry) {
            Ok(data) => {
                if let Err(e) = self.backend.set(&self.function.name, key, &data) {
                    tracing::error!(
                        cache_key = %key,
                        error = %e,
                        "Failed to store cache entry"
                    );
                }
            }
            Err(e) => {
                tracing::error!(
                    cache_key = %key,
                    error = %e,
                    "Failed to serialize cache entry"
                );
            }
        }
    }
}
