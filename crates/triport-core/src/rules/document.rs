//! Document shape checks (DOC-001 to DOC-003)

use crate::{config::CheckConfig, diagnostics::Diagnostic, rules::Validator};
use serde_json::Value;
use std::path::Path;

/// Top-level keys the console writes
const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["properties", "import.local"];

pub struct DocumentValidator;

impl Validator for DocumentValidator {
    fn validate(&self, path: &Path, doc: &Value, config: &CheckConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !config.rules.document {
            return diagnostics;
        }

        // DOC-001: the state file is a single JSON object
        let root = match doc.as_object() {
            Some(root) => root,
            None => {
                if config.is_rule_enabled("DOC-001") {
                    diagnostics.push(Diagnostic::error(
                        path.to_path_buf(),
                        "DOC-001",
                        "State file root must be a JSON object".to_string(),
                    ));
                }
                return diagnostics;
            }
        };

        if config.is_rule_enabled("DOC-001") {
            if let Some(properties) = root.get("properties") {
                if !properties.is_object() {
                    diagnostics.push(Diagnostic::error(
                        path.to_path_buf(),
                        "DOC-001",
                        "'properties' must be a JSON object".to_string(),
                    ));
                }
            }
            if let Some(history) = root.get("import.local") {
                if !history.is_object() {
                    diagnostics.push(Diagnostic::error(
                        path.to_path_buf(),
                        "DOC-001",
                        "'import.local' must be a JSON object".to_string(),
                    ));
                }
            }
        }

        // DOC-002: every history entry is an object
        if config.is_rule_enabled("DOC-002") {
            if let Some(history) = root.get("import.local").and_then(Value::as_object) {
                for (key, value) in history {
                    if !value.is_object() {
                        diagnostics.push(
                            Diagnostic::error(
                                path.to_path_buf(),
                                "DOC-002",
                                "Import history entry is not an object".to_string(),
                            )
                            .with_key(key),
                        );
                    }
                }
            }
        }

        // DOC-003: unknown top-level keys survive a save, but flag them
        if config.is_rule_enabled("DOC-003") {
            for key in root.keys() {
                if !KNOWN_TOP_LEVEL_KEYS.contains(&key.as_str()) {
                    diagnostics.push(
                        Diagnostic::info(
                            path.to_path_buf(),
                            "DOC-003",
                            format!("Unknown top-level key '{key}'"),
                        )
                        .with_suggestion(
                            "Unknown keys are preserved on save; this may be data from a newer console"
                                .to_string(),
                        ),
                    );
                }
            }
        }

        diagnostics
    }
}
