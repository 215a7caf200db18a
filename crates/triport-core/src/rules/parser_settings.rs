//! Parser settings checks (PS-001 to PS-003)

use crate::{
    config::CheckConfig,
    diagnostics::Diagnostic,
    model::PARSER_FLAGS,
    rules::{import_history, Validator},
};
use serde_json::Value;
use std::path::Path;

pub struct ParserSettingsValidator;

impl ParserSettingsValidator {
    fn flag(settings: &Value, name: &str) -> bool {
        settings.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    fn check_settings(
        path: &Path,
        key: &str,
        settings: &Value,
        config: &CheckConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let object = match settings.as_object() {
            Some(object) => object,
            None => {
                if config.is_rule_enabled("PS-001") {
                    diagnostics.push(
                        Diagnostic::warning(
                            path.to_path_buf(),
                            "PS-001",
                            "'parserSettings' is not an object".to_string(),
                        )
                        .with_key(key),
                    );
                }
                return;
            }
        };

        // PS-001: all nine flags present
        if config.is_rule_enabled("PS-001") {
            let missing: Vec<&str> = PARSER_FLAGS
                .iter()
                .filter(|flag| !object.contains_key(**flag))
                .copied()
                .collect();
            if !missing.is_empty() {
                let mut diagnostic = Diagnostic::warning(
                    path.to_path_buf(),
                    "PS-001",
                    format!("Missing parser flags: {}", missing.join(", ")),
                )
                .with_key(key);
                if missing == ["verifyURISyntax"] {
                    diagnostic = diagnostic.with_suggestion(
                        "File predates verifyURISyntax; the default (true) applies on load"
                            .to_string(),
                    );
                }
                diagnostics.push(diagnostic);
            }
        }

        // PS-002: keys the console never writes
        if config.is_rule_enabled("PS-002") {
            for flag in object.keys() {
                if !PARSER_FLAGS.contains(&flag.as_str()) {
                    diagnostics.push(
                        Diagnostic::warning(
                            path.to_path_buf(),
                            "PS-002",
                            format!("Unknown parser flag '{flag}'"),
                        )
                        .with_key(key),
                    );
                }
            }
        }

        // PS-003: fail-fast and normalize are mutually exclusive in the
        // console UI; both set at once means the file was edited by hand
        if config.is_rule_enabled("PS-003") {
            let contradictions = [
                ("failOnUnknownDataTypes", "normalizeDataTypeValues"),
                ("failOnUnknownLanguageTags", "normalizeLanguageTags"),
            ];
            for (fail, normalize) in contradictions {
                if Self::flag(settings, fail) && Self::flag(settings, normalize) {
                    diagnostics.push(
                        Diagnostic::warning(
                            path.to_path_buf(),
                            "PS-003",
                            format!("'{fail}' and '{normalize}' are both set"),
                        )
                        .with_key(key),
                    );
                }
            }
        }
    }
}

impl Validator for ParserSettingsValidator {
    fn validate(&self, path: &Path, doc: &Value, config: &CheckConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !config.rules.parser_settings {
            return diagnostics;
        }

        let history = match import_history(doc) {
            Some(history) => history,
            None => return diagnostics,
        };

        for (key, value) in history {
            if !value.is_object() {
                continue;
            }
            match value.get("parserSettings") {
                Some(settings) => {
                    Self::check_settings(path, key, settings, config, &mut diagnostics)
                }
                None => {
                    if config.is_rule_enabled("PS-001") {
                        diagnostics.push(
                            Diagnostic::warning(
                                path.to_path_buf(),
                                "PS-001",
                                "Record has no 'parserSettings'".to_string(),
                            )
                            .with_key(key),
                        );
                    }
                }
            }
        }

        diagnostics
    }
}
