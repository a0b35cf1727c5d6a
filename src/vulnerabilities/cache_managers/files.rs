//! This module contains the FileCacheManager struct.

use std::env;
use std::fs::{create_dir_all, read, write};
use std::path::{Path, PathBuf};

use log::{debug, error, info, trace, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::confirm::Confirm;
use super::CacheManager;
use crate::errors::CacheError;
use crate::models::{Record, Search};

/// The question asked when a snapshot is found.
const IGNORE_QUESTION: &str = "Previous results found! Do you want to ignore them?";

/// Returns the directory used when none is configured.
pub fn default_cache_dir() -> PathBuf {
    env::temp_dir().join("cvesearch")
}

/// Represents a cache manager which stores the data in files.
///
/// The cache has the following structure:
/// <root_dir>/
///   \__<cache_key>.json
///
/// The JSON files contain an array of records.
pub struct FileCacheManager {
    /// The directory holding the snapshots
    root_dir: PathBuf,
    /// Decides whether an existing snapshot is ignored
    confirm: Box<dyn Confirm>,
}

impl FileCacheManager {
    pub fn new(root_dir: &Path, confirm: Box<dyn Confirm>) -> Self {
        Self {
            root_dir: root_dir.to_path_buf(),
            confirm,
        }
    }

    /// Reads and deserializes a snapshot.
    pub fn read(&self, path: &Path) -> Result<Vec<Record>, CacheError> {
        trace!("Running FileCacheManager::read()");
        let data = read(path).map_err(|source| CacheError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&data).map_err(|source| CacheError::Deserialize {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CacheManager for FileCacheManager {
    fn resolve_path(&self, search: &Search) -> PathBuf {
        self.root_dir.join(format!("{}.json", search.cache_key()))
    }

    /// Loads a snapshot, after asking the user whether to ignore it.
    /// Any error while reading it makes it a cache miss.
    fn load(&self, path: &Path) -> Option<Vec<Record>> {
        trace!("Running FileCacheManager::load()");
        if !path.exists() {
            debug!("No snapshot at {}", path.to_string_lossy());
            return None;
        }

        if self.confirm.confirm(IGNORE_QUESTION) {
            info!("The user chose to ignore {}", path.to_string_lossy());
            return None;
        }

        match self.read(path) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!("Ignoring the snapshot: {}", e);
                None
            }
        }
    }

    /// Stores the records as JSON indented with 4 spaces.
    fn store(&self, path: &Path, records: &[Record]) -> Result<(), CacheError> {
        trace!("Running FileCacheManager::store()");
        if let Some(dirname) = path.parent() {
            if !dirname.exists() {
                create_dir_all(dirname).map_err(|source| {
                    error!("Unable to create the directory {}", dirname.to_string_lossy());
                    CacheError::CreateDir {
                        path: dirname.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let mut json = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut json, PrettyFormatter::with_indent(b"    "));
        records
            .serialize(&mut serializer)
            .map_err(|source| CacheError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;

        write(path, json).map_err(|source| {
            error!("Unable to write the file {}", path.to_string_lossy());
            CacheError::Write {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
