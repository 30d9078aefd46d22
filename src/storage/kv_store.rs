//! File-backed key-value store standing in for browser local storage.
//!
//! Every record is a string value under a string key, exactly like the
//! snapshot layout the web client used. The whole map is written back as
//! one pretty-printed JSON document on [`KeyValueStore::save`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

pub const INVENTORY_KEY: &str = "Cheffy_inventory";
pub const RECIPES_KEY: &str = "Cheffy_recipes";
pub const LANGUAGE_KEY: &str = "Cheffy_language";
pub const USER_KEY: &str = "Cheffy_user";

#[derive(Debug)]
pub struct KeyValueStore {
    storage_file: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl KeyValueStore {
    /// Opens the store at `storage_file`.
    ///
    /// A missing or empty file yields an empty store. A file that is not a
    /// JSON object of strings is logged and treated as empty so that the
    /// callers fall back to their defaults instead of failing to start.
    pub fn open(storage_file: impl AsRef<Path>) -> Result<Self> {
        let storage_file = storage_file.as_ref().to_path_buf();
        let entries = if storage_file.exists() && storage_file.metadata()?.len() > 0 {
            let contents = fs::read_to_string(&storage_file)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "Store file {:?} is malformed ({}); starting from an empty store",
                        storage_file, e
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };
        debug!("Opened key-value store {:?} with {} keys", storage_file, entries.len());

        Ok(Self {
            storage_file: Some(storage_file),
            entries,
        })
    }

    /// A store that lives only in memory; `save` is a no-op.
    pub fn in_memory() -> Self {
        Self {
            storage_file: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.storage_file {
            let serialized = serde_json::to_string_pretty(&self.entries)?;
            fs::write(path, serialized)?;
            debug!("Saved {} keys to {:?}", self.entries.len(), path);
        }
        Ok(())
    }
}
