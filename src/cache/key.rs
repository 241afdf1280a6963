//! 캐시 키 생성 모듈.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_128;

use crate::error::AppResult;

/// Identity of a memoized function.
///
/// Bumping `version` retires every entry recorded under the old version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionId {
    pub name: String,
    pub version: u32,
}

impl FunctionId {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// Hashes a call's arguments into a 32-hex-digit key.
///
/// Arguments are MessagePack-encoded and prefixed with `name:version:`
/// before hashing with xxh3-128.
pub fn cache_key<A: Serialize + ?Sized>(function: &FunctionId, args: &A) -> AppResult<String> {
    let mut hash_input = format!("{}:{}:", function.name, function.version).into_bytes();
    hash_input.extend(rmp_serde::to_vec(args)?);

    Ok(format!("{:032x}", xxh3_128(&hash_input)))
}

/// Whether `key` has the shape `cache_key` produces.
pub fn is_cache_key(key: &str) -> bool {
    key.len() == 32 && key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
