//! The module cache_managers defines the vulnerabilities cache managers.
pub mod confirm;
pub mod files;

use std::path::{Path, PathBuf};

use crate::errors::CacheError;
use crate::models::{Record, Search};

/// A common interface between all cache managers.
pub trait CacheManager {
    /// Returns the location of the snapshot for a search.
    fn resolve_path(&self, search: &Search) -> PathBuf;

    /// Loads the records stored for a search, if the user wants to reuse them.
    /// Returns None when there is nothing usable in cache.
    fn load(&self, path: &Path) -> Option<Vec<Record>>;

    /// Stores the records of a search, replacing any previous snapshot.
    fn store(&self, path: &Path, records: &[Record]) -> Result<(), CacheError>;
}
