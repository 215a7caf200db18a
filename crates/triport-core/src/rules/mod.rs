//! Structural checks over the raw state document
//!
//! Validators operate on the loosely parsed `serde_json::Value` rather than
//! the typed model, so a file with one broken record still gets per-record
//! diagnostics instead of a single parse failure.

pub mod document;
pub mod keys;
pub mod parser_settings;
pub mod record;
pub mod timeline;

use crate::{config::CheckConfig, diagnostics::Diagnostic};
use serde_json::{Map, Value};
use std::path::Path;

/// Trait for state document checkers
pub trait Validator {
    fn validate(&self, path: &Path, doc: &Value, config: &CheckConfig) -> Vec<Diagnostic>;
}

/// All checkers, in reporting order
pub fn all_validators() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(document::DocumentValidator),
        Box::new(keys::KeysValidator),
        Box::new(record::RecordValidator),
        Box::new(parser_settings::ParserSettingsValidator),
        Box::new(timeline::TimelineValidator),
    ]
}

/// The `import.local` history map, if the document carries one
pub(crate) fn import_history(doc: &Value) -> Option<&Map<String, Value>> {
    doc.get("import.local").and_then(Value::as_object)
}
