//! Memoization cache module.
//!
//! Persists function results keyed by a hash of their arguments.

pub mod backend;
pub mod key;
pub mod memo;

pub use backend::{CacheBackend, DiskCache, MemoryCache};
pub use key::{cache_key, is_cache_key, FunctionId};
pub use memo::{is_expired, CacheEntry, CacheStats, Memoized};
