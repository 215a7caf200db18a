//! Import record checks (REC-001 to REC-005)

use crate::{
    config::CheckConfig,
    diagnostics::Diagnostic,
    model::ImportStatus,
    rules::{import_history, Validator},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Shape of the data handles the console assigns to uploaded bytes
static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("Invalid UUID regex")
});

/// Minimal record schema for checking (allows optional/missing fields)
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    name: Option<String>,
    status: Option<String>,
    context: Option<String>,
    #[serde(rename = "baseURI")]
    base_uri: Option<String>,
    data: Option<String>,
    timestamp: Option<i64>,
}

pub struct RecordValidator;

impl RecordValidator {
    fn check_record(
        path: &Path,
        key: &str,
        value: &Value,
        config: &CheckConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if !value.is_object() {
            // DOC-002 reports the shape problem
            return;
        }

        let record: RawRecord = match serde_json::from_value(value.clone()) {
            Ok(record) => record,
            Err(e) => {
                diagnostics.push(
                    Diagnostic::error(
                        path.to_path_buf(),
                        "record::parse",
                        format!("Failed to parse import record: {e}"),
                    )
                    .with_key(key),
                );
                return;
            }
        };

        // REC-001: required identity fields must be present and non-empty
        if config.is_rule_enabled("REC-001") {
            let required = [
                ("name", &record.name),
                ("status", &record.status),
                ("context", &record.context),
                ("baseURI", &record.base_uri),
            ];
            for (field, value) in required {
                if value.as_deref().map_or(true, str::is_empty) {
                    diagnostics.push(
                        Diagnostic::error(
                            path.to_path_buf(),
                            "REC-001",
                            format!("Missing or empty required field '{field}'"),
                        )
                        .with_key(key),
                    );
                }
            }
        }

        // REC-002: timestamp present and positive
        if config.is_rule_enabled("REC-002") {
            match record.timestamp {
                Some(ts) if ts > 0 => {}
                Some(ts) => diagnostics.push(
                    Diagnostic::error(
                        path.to_path_buf(),
                        "REC-002",
                        format!("Timestamp must be positive milliseconds since the epoch, got {ts}"),
                    )
                    .with_key(key),
                ),
                None => diagnostics.push(
                    Diagnostic::error(
                        path.to_path_buf(),
                        "REC-002",
                        "Missing required field 'timestamp'".to_string(),
                    )
                    .with_key(key),
                ),
            }
        }

        let status = record
            .status
            .as_deref()
            .map(|s| ImportStatus::from(s.to_string()));

        // REC-003: a completed import is expected to carry its data handle
        if config.is_rule_enabled("REC-003")
            && status == Some(ImportStatus::Done)
            && record.data.as_deref().map_or(true, str::is_empty)
        {
            diagnostics.push(
                Diagnostic::warning(
                    path.to_path_buf(),
                    "REC-003",
                    "Record has status DONE but no data handle".to_string(),
                )
                .with_key(key)
                .with_suggestion(
                    "The console keeps the uploaded bytes under this handle; without it a re-import needs the original source".to_string(),
                ),
            );
        }

        // REC-004: data handles are UUIDs
        if config.is_rule_enabled("REC-004") {
            if let Some(data) = record.data.as_deref() {
                if !data.is_empty() && !UUID_REGEX.is_match(data) {
                    diagnostics.push(
                        Diagnostic::warning(
                            path.to_path_buf(),
                            "REC-004",
                            format!("Data handle '{data}' does not look like a UUID"),
                        )
                        .with_key(key),
                    );
                }
            }
        }

        // REC-005: unknown status strings round-trip, but surface them
        if config.is_rule_enabled("REC-005") {
            if let Some(status) = &status {
                if !status.is_known() && !status.as_str().is_empty() {
                    diagnostics.push(
                        Diagnostic::info(
                            path.to_path_buf(),
                            "REC-005",
                            format!("Unknown status '{status}'"),
                        )
                        .with_key(key),
                    );
                }
            }
        }
    }
}

impl Validator for RecordValidator {
    fn validate(&self, path: &Path, doc: &Value, config: &CheckConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !config.rules.records {
            return diagnostics;
        }

        let history = match import_history(doc) {
            Some(history) => history,
            None => return diagnostics,
        };

        for (key, value) in history {
            Self::check_record(path, key, value, config, &mut diagnostics);
        }

        diagnostics
    }
}
