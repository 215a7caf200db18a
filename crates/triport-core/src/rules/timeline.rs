//! Timestamp sanity checks (TL-001)
//!
//! History order in the file is whatever the console's map iteration gave;
//! monotonicity across records is not a schema rule. What is checkable: no
//! record can claim a timestamp from the future.

use crate::{
    config::CheckConfig,
    diagnostics::Diagnostic,
    rules::{import_history, Validator},
};
use serde_json::Value;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock skew allowance between the writing host and this one
const MAX_SKEW_MILLIS: i64 = 5 * 60 * 1000;

pub struct TimelineValidator;

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

impl Validator for TimelineValidator {
    fn validate(&self, path: &Path, doc: &Value, config: &CheckConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if !config.rules.timeline || !config.is_rule_enabled("TL-001") {
            return diagnostics;
        }

        let history = match import_history(doc) {
            Some(history) => history,
            None => return diagnostics,
        };

        let horizon = now_millis() + MAX_SKEW_MILLIS;

        for (key, value) in history {
            if let Some(ts) = value.get("timestamp").and_then(Value::as_i64) {
                if ts > horizon {
                    diagnostics.push(
                        Diagnostic::warning(
                            path.to_path_buf(),
                            "TL-001",
                            format!("Timestamp {ts} lies in the future"),
                        )
                        .with_key(key)
                        .with_suggestion(
                            "Check the clock of the host that wrote this file".to_string(),
                        ),
                    );
                }
            }
        }

        diagnostics
    }
}
