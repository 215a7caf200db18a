//! # triport-core
//!
//! Reader, writer, and structural checker for the JSON import-state file a
//! triple store's administration console persists after bulk RDF imports.
//!
//! The file has no schema version and no tolerance for data loss: whatever
//! this tool does not understand it must carry through unchanged. The typed
//! model ([`model::SettingsDocument`]) keeps unknown keys at every level;
//! the checker ([`check_file`]) works on the loosely parsed document so one
//! broken record does not hide diagnostics for the rest.

pub mod config;
pub mod diagnostics;
pub mod file_utils;
pub mod key;
pub mod model;
pub mod rules;
pub mod store;

use std::path::Path;

pub use config::{CheckConfig, SeverityLevel};
pub use diagnostics::{Diagnostic, DiagnosticLevel, StateError, StateResult};
pub use key::ImportKey;
pub use model::{ImportRecord, ImportStatus, ParserSettings, SettingsDocument, SourceType};
pub use store::StateFile;

use file_utils::safe_read_file_with_limit;
use rules::all_validators;

/// Check a state file on disk.
///
/// I/O failures (unreadable, symlink, oversized) are hard errors; anything
/// inside the file comes back as diagnostics.
pub fn check_file(path: &Path, config: &CheckConfig) -> StateResult<Vec<Diagnostic>> {
    let content = safe_read_file_with_limit(path, config.max_file_size)?;
    Ok(check_str(path, &content, config))
}

/// Check already-read state file content.
pub fn check_str(path: &Path, content: &str, config: &CheckConfig) -> Vec<Diagnostic> {
    let doc: serde_json::Value = match serde_json::from_str(content) {
        Ok(doc) => doc,
        Err(e) => {
            return vec![Diagnostic::error(
                path.to_path_buf(),
                "document::parse",
                format!("Failed to parse state file: {e}"),
            )];
        }
    };

    let mut diagnostics = Vec::new();
    for validator in all_validators() {
        diagnostics.extend(validator.validate(path, &doc, config));
    }

    diagnostics.retain(|d| config.includes_level(d.level));

    // Sort by severity, then record key, then rule for full determinism
    diagnostics.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.key.cmp(&b.key))
            .then_with(|| a.rule.cmp(&b.rule))
    });

    diagnostics
}
