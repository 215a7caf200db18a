//! JSON output format support.
//!
//! Machine-readable rendering of checker diagnostics, for CI pipelines that
//! gate on the import-state file.

use serde::Serialize;
use std::path::Path;
use triport_core::{Diagnostic, DiagnosticLevel};

/// Root structure for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Version of triport that produced this output.
    pub version: String,
    /// Path of the state file that was checked.
    pub file: String,
    /// Number of import records in the file.
    pub records_checked: usize,
    /// List of diagnostics found.
    pub diagnostics: Vec<JsonDiagnostic>,
    /// Summary counts by level.
    pub summary: JsonSummary,
}

/// A single diagnostic in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity level: error, warning, or info.
    pub level: String,
    /// Rule identifier (e.g., REC-003).
    pub rule: String,
    /// Composite history key, when the diagnostic points at one record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Diagnostic message.
    pub message: String,
    /// Optional suggestion for fixing the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Summary counts by diagnostic level.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
    /// Number of info messages.
    pub info: usize,
}

fn level_to_string(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Error => "error",
        DiagnosticLevel::Warning => "warning",
        DiagnosticLevel::Info => "info",
    }
}

/// Convert diagnostics to JSON output format.
pub fn diagnostics_to_json(
    diagnostics: &[Diagnostic],
    file: &Path,
    records_checked: usize,
) -> JsonOutput {
    let mut errors = 0;
    let mut warnings = 0;
    let mut info = 0;

    let json_diagnostics: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|diag| {
            match diag.level {
                DiagnosticLevel::Error => errors += 1,
                DiagnosticLevel::Warning => warnings += 1,
                DiagnosticLevel::Info => info += 1,
            }
            JsonDiagnostic {
                level: level_to_string(diag.level).to_string(),
                rule: diag.rule.clone(),
                key: diag.key.clone(),
                message: diag.message.clone(),
                suggestion: diag.suggestion.clone(),
            }
        })
        .collect();

    JsonOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        file: file.to_string_lossy().replace('\\', "/"),
        records_checked,
        diagnostics: json_diagnostics,
        summary: JsonSummary {
            errors,
            warnings,
            info,
        },
    }
}
