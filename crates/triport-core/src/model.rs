//! Typed model of the import-state document
//!
//! The console persists a single JSON object: a free-form `properties` map
//! plus an `import.local` history keyed by composite `repository;;source`
//! strings. There is no schema version field, so every level of the model
//! keeps unknown keys in a flattened pass-through map and writes them back
//! unchanged on save.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Root object of the state file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Free-form console settings (e.g. `current.location`)
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,

    /// Import history, keyed by `repository;;source`
    #[serde(rename = "import.local", default)]
    pub import_local: BTreeMap<String, ImportRecord>,

    /// Unknown top-level keys, preserved across load/save
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Status snapshot of one historical bulk-load operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub name: String,
    pub status: ImportStatus,
    #[serde(default)]
    pub message: String,
    /// Named graph the imported triples were scoped to
    pub context: String,
    #[serde(default)]
    pub replace_graphs: Vec<String>,
    /// Base for resolving relative references during import
    #[serde(rename = "baseURI")]
    pub base_uri: String,
    #[serde(default)]
    pub force_serial: bool,
    #[serde(rename = "type", default)]
    pub source_type: SourceType,
    /// Explicit format override; null when the format was auto-detected
    #[serde(default)]
    pub format: Option<String>,
    /// Opaque handle (UUID) referencing the uploaded bytes
    #[serde(default)]
    pub data: Option<String>,
    /// Milliseconds since the epoch
    pub timestamp: i64,
    #[serde(default)]
    pub parser_settings: ParserSettings,

    /// Unknown record keys, preserved across load/save
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Import status as written by the console.
///
/// Open enum: status strings this tool does not know are kept verbatim so a
/// newer console's files survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImportStatus {
    Done,
    Error,
    Pending,
    Importing,
    Canceled,
    Interrupted,
    None,
    Other(String),
}

impl ImportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ImportStatus::Done => "DONE",
            ImportStatus::Error => "ERROR",
            ImportStatus::Pending => "PENDING",
            ImportStatus::Importing => "IMPORTING",
            ImportStatus::Canceled => "CANCELED",
            ImportStatus::Interrupted => "INTERRUPTED",
            ImportStatus::None => "NONE",
            ImportStatus::Other(s) => s,
        }
    }

    /// Whether this is a status string the console is known to write
    pub fn is_known(&self) -> bool {
        !matches!(self, ImportStatus::Other(_))
    }
}

impl From<String> for ImportStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DONE" => ImportStatus::Done,
            "ERROR" => ImportStatus::Error,
            "PENDING" => ImportStatus::Pending,
            "IMPORTING" => ImportStatus::Importing,
            "CANCELED" => ImportStatus::Canceled,
            "INTERRUPTED" => ImportStatus::Interrupted,
            "NONE" => ImportStatus::None,
            _ => ImportStatus::Other(s),
        }
    }
}

impl From<ImportStatus> for String {
    fn from(status: ImportStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the imported bytes came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    File,
    Url,
    Text,
    Directory,
    Other(String),
}

impl Default for SourceType {
    fn default() -> Self {
        SourceType::File
    }
}

impl SourceType {
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::File => "file",
            SourceType::Url => "url",
            SourceType::Text => "text",
            SourceType::Directory => "directory",
            SourceType::Other(s) => s,
        }
    }
}

impl From<String> for SourceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "file" => SourceType::File,
            "url" => SourceType::Url,
            "text" => SourceType::Text,
            "directory" => SourceType::Directory,
            _ => SourceType::Other(s),
        }
    }
}

impl From<SourceType> for String {
    fn from(t: SourceType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Helper function for serde default
fn default_true() -> bool {
    true
}

/// Tolerance flags the parser applied during import.
///
/// Nine flags in the current format. Files written before `verifyURISyntax`
/// existed carry only eight; the serde defaults below match the console's
/// own defaults so those files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserSettings {
    #[serde(rename = "preserveBNodeIds", default)]
    pub preserve_bnode_ids: bool,

    #[serde(default)]
    pub fail_on_unknown_data_types: bool,

    #[serde(default)]
    pub verify_data_type_values: bool,

    #[serde(default)]
    pub normalize_data_type_values: bool,

    #[serde(default)]
    pub fail_on_unknown_language_tags: bool,

    #[serde(default = "default_true")]
    pub verify_language_tags: bool,

    #[serde(default)]
    pub normalize_language_tags: bool,

    #[serde(rename = "verifyURISyntax", default = "default_true")]
    pub verify_uri_syntax: bool,

    #[serde(default = "default_true")]
    pub stop_on_error: bool,

    /// Unknown parser flags, preserved across load/save
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            preserve_bnode_ids: false,
            fail_on_unknown_data_types: false,
            verify_data_type_values: false,
            normalize_data_type_values: false,
            fail_on_unknown_language_tags: false,
            verify_language_tags: true,
            normalize_language_tags: false,
            verify_uri_syntax: true,
            stop_on_error: true,
            extra: BTreeMap::new(),
        }
    }
}

/// Wire names of the nine parser flags, in document order
pub const PARSER_FLAGS: &[&str] = &[
    "preserveBNodeIds",
    "failOnUnknownDataTypes",
    "verifyDataTypeValues",
    "normalizeDataTypeValues",
    "failOnUnknownLanguageTags",
    "verifyLanguageTags",
    "normalizeLanguageTags",
    "verifyURISyntax",
    "stopOnError",
];
