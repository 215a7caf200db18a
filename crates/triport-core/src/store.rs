//! State file load, save, and mutation
//!
//! The console treats the file as a write-once-per-run snapshot: it reads the
//! whole document at startup and rewrites the whole document after each
//! import attempt. `StateFile` mirrors that: load parses everything up front,
//! save re-serializes everything and swaps the file atomically.

use crate::diagnostics::{StateError, StateResult};
use crate::file_utils::{safe_read_file_with_limit, write_atomic, DEFAULT_MAX_FILE_SIZE};
use crate::key::ImportKey;
use crate::model::{ImportRecord, SettingsDocument};
use serde_json::Value;
use std::path::Path;

/// An import-state document plus the operations the console performs on it.
#[derive(Debug, Clone, Default)]
pub struct StateFile {
    doc: SettingsDocument,
}

impl StateFile {
    /// Empty document the way the console initializes one.
    pub fn new() -> Self {
        let mut doc = SettingsDocument::default();
        doc.properties
            .insert("current.location".to_string(), Value::String(String::new()));
        Self { doc }
    }

    pub fn from_document(doc: SettingsDocument) -> Self {
        Self { doc }
    }

    /// Load a state file from disk with the default size limit.
    pub fn load(path: &Path) -> StateResult<Self> {
        Self::load_with_limit(path, DEFAULT_MAX_FILE_SIZE)
    }

    pub fn load_with_limit(path: &Path, max_size: u64) -> StateResult<Self> {
        let content = safe_read_file_with_limit(path, max_size)?;
        let doc = serde_json::from_str(&content).map_err(|e| StateError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { doc })
    }

    /// Serialize the whole document (pretty-printed, the way the console
    /// writes it) and atomically replace `path`.
    pub fn save(&self, path: &Path) -> StateResult<()> {
        let mut content = serde_json::to_string_pretty(&self.doc)
            .map_err(|e| StateError::Serialize { source: e })?;
        content.push('\n');
        write_atomic(path, &content)
    }

    pub fn document(&self) -> &SettingsDocument {
        &self.doc
    }

    pub fn into_document(self) -> SettingsDocument {
        self.doc
    }

    pub fn len(&self) -> usize {
        self.doc.import_local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc.import_local.is_empty()
    }

    pub fn get(&self, key: &ImportKey) -> Option<&ImportRecord> {
        self.doc.import_local.get(&key.to_string())
    }

    /// Insert or replace the record under `key`.
    ///
    /// The key's source part must match the record's `name`; the console
    /// always writes them in agreement and downstream tooling relies on it.
    pub fn record(&mut self, key: &ImportKey, record: ImportRecord) -> StateResult<()> {
        if key.source != record.name {
            return Err(StateError::KeyMismatch {
                key: key.to_string(),
                key_source: key.source.clone(),
                name: record.name,
            });
        }
        self.doc.import_local.insert(key.to_string(), record);
        Ok(())
    }

    /// Remove the record under `key`, returning it if present.
    pub fn forget(&mut self, key: &ImportKey) -> Option<ImportRecord> {
        self.doc.import_local.remove(&key.to_string())
    }

    /// History entries sorted by timestamp, composite key as tiebreak.
    pub fn records_by_time(&self) -> Vec<(&str, &ImportRecord)> {
        let mut entries: Vec<(&str, &ImportRecord)> = self
            .doc
            .import_local
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.1.timestamp.cmp(&b.1.timestamp).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.doc.properties.get(name)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
        self.doc.properties.insert(name.into(), value);
    }
}
