//! 캐시 저장소 모듈.
//!
//! Byte-level stores keyed by `(function, key)`.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::cache::key::is_cache_key;
use crate::error::{AppError, AppResult};

/// File extension of a stored entry.
pub const ENTRY_EXTENSION: &str = "msgpack";

/// Storage seam for memoized results.
pub trait CacheBackend {
    /// Returns the stored bytes, or `None` when absent.
    fn get(&self, function: &str, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Stores `data`, replacing any previous entry.
    fn set(&mut self, function: &str, key: &str, data: &[u8]) -> AppResult<()>;

    /// Removes one entry. Removing a missing entry is not an error.
    fn remove(&mut self, function: &str, key: &str) -> AppResult<()>;

    /// Removes every entry.
    fn clear(&mut self) -> AppResult<()>;

    /// Number of stored entries.
    fn len(&self) -> AppResult<usize>;

    fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T: CacheBackend + ?Sized> CacheBackend for Box<T> {
    fn get(&self, function: &str, key: &str) -> AppResult<Option<Vec<u8>>> {
        (**self).get(function, key)
    }

    fn set(&mut self, function: &str, key: &str, data: &[u8]) -> AppResult<()> {
        (**self).set(function, key, data)
    }

    fn remove(&mut self, function: &str, key: &str) -> AppResult<()> {
        (**self).remove(function, key)
    }

    fn clear(&mut self) -> AppResult<()> {
        (**self).clear()
    }

    fn len(&self) -> AppResult<usize> {
        (**self).len()
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<(String, String), Vec<u8>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, function: &str, key: &str) -> AppResult<Option<Vec<u8>>> {
        Ok(self
            .entries
            .get(&(function.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&mut self, function: &str, key: &str, data: &[u8]) -> AppResult<()> {
        self.entries
            .insert((function.to_string(), key.to_string()), data.to_vec());
        Ok(())
    }

    fn remove(&mut self, function: &str, key: &str) -> AppResult<()> {
        self.entries.remove(&(function.to_string(), key.to_string()));
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.entries.clear();
        Ok(())
    }

    fn len(&self) -> AppResult<usize> {
        Ok(self.entries.len())
    }
}

/// Directory-backed store: one file per entry at `<root>/<function>/<key>.msgpack`.
///
/// Only files whose stem is a cache key count as entries, so the root may be
/// shared with unrelated files.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Opens (and creates if needed) a cache rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        if !root.is_dir() {
            return Err(AppError::Cache(format!(
                "cache root {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, function: &str, key: &str) -> PathBuf {
        self.root
            .join(function)
            .join(format!("{key}.{ENTRY_EXTENSION}"))
    }

    fn is_entry_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION)
            && path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(is_cache_key)
    }

    /// Function directories currently present under the root.
    fn function_dirs(&self) -> AppResult<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(dirs),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        Ok(dirs)
    }

    fn entry_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && Self::is_entry_file(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

impl CacheBackend for DiskCache {
    fn get(&self, function: &str, key: &str) -> AppResult<Option<Vec<u8>>> {
        match fs::read(self.entry_path(function, key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, function: &str, key: &str, data: &[u8]) -> AppResult<()> {
        if !is_cache_key(key) {
            return Err(AppError::Cache(format!("malformed cache key {key:?}")));
        }
        let path = self.entry_path(function, key);
        let parent = path.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(parent)?;

        // Readers only ever see complete entries; a failed write drops the temp file
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(data)?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&mut self, function: &str, key: &str) -> AppResult<()> {
        match fs::remove_file(self.entry_path(function, key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes entry files, then each function directory they emptied.
    fn clear(&mut self) -> AppResult<()> {
        let mut removed = 0_usize;
        for dir in self.function_dirs()? {
            let files = Self::entry_files(&dir)?;
            if files.is_empty() {
                continue;
            }
            for file in files {
                fs::remove_file(file)?;
                removed += 1;
            }
            if fs::read_dir(&dir)?.next().is_none() {
                fs::remove_dir(&dir)?;
            }
        }

        tracing::info!(
            root = %self.root.display(),
            removed = removed,
            "Cache cleared"
        );
        Ok(())
    }

    fn len(&self) -> AppResult<usize> {
        let mut count = 0;
        for dir in self.function_dirs()? {
            count += Self::entry_files(&dir)?.len();
        }
        Ok(count)
    }
}
