//! Composite key checks (KEY-001, KEY-002)

use crate::{
    config::CheckConfig,
    diagnostics::Diagnostic,
    key::ImportKey,
    rules::{import_history, Validator},
};
use serde_json::Value;
use std::path::Path;

pub struct KeysValidator;

impl Validator for KeysValidator {
    fn validate(&self, path: &Path, doc: &Value, config: &CheckConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !config.rules.keys {
            return diagnostics;
        }

        let history = match import_history(doc) {
            Some(history) => history,
            None => return diagnostics,
        };

        for (raw_key, value) in history {
            // KEY-001: key must be repository;;source with both parts non-empty
            let key = match raw_key.parse::<ImportKey>() {
                Ok(key) => key,
                Err(e) => {
                    if config.is_rule_enabled("KEY-001") {
                        diagnostics.push(
                            Diagnostic::error(
                                path.to_path_buf(),
                                "KEY-001",
                                format!("Malformed composite key: {e}"),
                            )
                            .with_key(raw_key)
                            .with_suggestion(
                                "History keys have the form '<repository>;;<source>'".to_string(),
                            ),
                        );
                    }
                    continue;
                }
            };

            // KEY-002: the source part must agree with the record's name
            if config.is_rule_enabled("KEY-002") {
                if let Some(name) = value.get("name").and_then(Value::as_str) {
                    if name != key.source {
                        diagnostics.push(
                            Diagnostic::error(
                                path.to_path_buf(),
                                "KEY-002",
                                format!(
                                    "Key names source '{}' but the record is named '{}'",
                                    key.source, name
                                ),
                            )
                            .with_key(raw_key),
                        );
                    }
                }
            }
        }

        diagnostics
    }
}
