//! Selection store persisted as a JSON file.
//!
//! Plays the role of the browser's local storage for terminal logins: keys
//! written by one run are visible to the next, and keys this tool does not
//! know about are kept as they are.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use participant_login::{PARTICIPANT_NAME_KEY, PARTICIPANT_UUID_KEY, SelectedIdentity, SelectionStore};

use crate::error::CliError;

#[derive(Debug)]
pub struct FileSelectionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSelectionStore {
    /// Load the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of string values.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CliError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| CliError::StoreFormat { path: path.clone(), source })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(CliError::Store { path, source }),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn identity(&self) -> Option<SelectedIdentity> {
        Some(SelectedIdentity {
            participant_uuid: self.get(PARTICIPANT_UUID_KEY)?.to_owned(),
            participant_name: self.get(PARTICIPANT_NAME_KEY)?.to_owned(),
        })
    }

    /// Write all entries back to disk.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Store`] if the file cannot be written.
    pub fn save(&self) -> Result<(), CliError> {
        let mut json = serde_json::to_string_pretty(&self.entries)
            .map_err(|source| CliError::StoreFormat { path: self.path.clone(), source })?;
        json.push('\n');
        std::fs::write(&self.path, json).map_err(|source| CliError::Store { path: self.path.clone(), source })
    }
}

impl SelectionStore for FileSelectionStore {
    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
