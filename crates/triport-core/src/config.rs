//! Checker configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::diagnostics::DiagnosticLevel;
use crate::file_utils::DEFAULT_MAX_FILE_SIZE;

/// Configuration for the structural checker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Severity level threshold
    pub severity: SeverityLevel,

    /// Rule categories to enable/disable
    pub rules: RuleConfig,

    /// Maximum state file size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            severity: SeverityLevel::Warning,
            rules: RuleConfig::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityLevel {
    Error,
    Warning,
    Info,
}

/// Helper function for serde default
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Enable document shape checks (DOC-*)
    #[serde(default = "default_true")]
    pub document: bool,

    /// Enable composite key checks (KEY-*)
    #[serde(default = "default_true")]
    pub keys: bool,

    /// Enable import record checks (REC-*)
    #[serde(default = "default_true")]
    pub records: bool,

    /// Enable parser settings checks (PS-*)
    #[serde(default = "default_true")]
    pub parser_settings: bool,

    /// Enable timestamp checks (TL-*)
    #[serde(default = "default_true")]
    pub timeline: bool,

    /// Explicitly disabled rules by ID (e.g., ["REC-004", "PS-001"])
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            document: true,
            keys: true,
            records: true,
            parser_settings: true,
            timeline: true,
            disabled_rules: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Load config from file
    pub fn load(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config or use default
    pub fn load_or_default(path: Option<&PathBuf>) -> Self {
        path.and_then(|p| Self::load(p).ok()).unwrap_or_default()
    }

    /// Whether a diagnostic of `level` passes the severity threshold.
    ///
    /// `severity = "Error"` reports only errors; `"Warning"` (the default)
    /// drops info messages; `"Info"` reports everything.
    pub fn includes_level(&self, level: DiagnosticLevel) -> bool {
        let threshold = match self.severity {
            SeverityLevel::Error => DiagnosticLevel::Error,
            SeverityLevel::Warning => DiagnosticLevel::Warning,
            SeverityLevel::Info => DiagnosticLevel::Info,
        };
        level <= threshold
    }

    /// Check if a specific rule is enabled based on config
    ///
    /// A rule is enabled if it's not in the disabled_rules list and its
    /// category is enabled.
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.rules.disabled_rules.iter().any(|r| r == rule_id) {
            return false;
        }
        self.is_category_enabled(rule_id)
    }

    /// Check if a rule's category is enabled
    fn is_category_enabled(&self, rule_id: &str) -> bool {
        match rule_id {
            s if s.starts_with("DOC-") => self.rules.document,
            s if s.starts_with("KEY-") => self.rules.keys,
            s if s.starts_with("REC-") => self.rules.records,
            s if s.starts_with("PS-") => self.rules.parser_settings,
            s if s.starts_with("TL-") => self.rules.timeline,
            // Unknown rules are enabled by default
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_enables_all_rules() {
        let config = CheckConfig::default();

        assert!(config.is_rule_enabled("DOC-001"));
        assert!(config.is_rule_enabled("KEY-001"));
        assert!(config.is_rule_enabled("REC-003"));
        assert!(config.is_rule_enabled("PS-001"));
        assert!(config.is_rule_enabled("TL-001"));
    }

    #[test]
    fn test_disabled_rules_list() {
        let mut config = CheckConfig::default();
        config.rules.disabled_rules = vec!["REC-004".to_string()];

        assert!(!config.is_rule_enabled("REC-004"));
        assert!(config.is_rule_enabled("REC-003"));
    }

    #[test]
    fn test_category_disabled_records() {
        let mut config = CheckConfig::default();
        config.rules.records = false;

        assert!(!config.is_rule_enabled("REC-001"));
        assert!(!config.is_rule_enabled("REC-005"));

        // Other categories still enabled
        assert!(config.is_rule_enabled("KEY-001"));
        assert!(config.is_rule_enabled("PS-001"));
    }

    #[test]
    fn test_category_disabled_parser_settings() {
        let mut config = CheckConfig::default();
        config.rules.parser_settings = false;

        assert!(!config.is_rule_enabled("PS-001"));
        assert!(!config.is_rule_enabled("PS-003"));
        assert!(config.is_rule_enabled("REC-001"));
    }

    #[test]
    fn test_unknown_rules_enabled_by_default() {
        let config = CheckConfig::default();
        assert!(config.is_rule_enabled("SOMETHING-001"));
    }

    #[test]
    fn test_disabled_rules_takes_precedence() {
        let mut config = CheckConfig::default();
        config.rules.disabled_rules = vec!["PS-002".to_string()];

        assert!(config.rules.parser_settings);
        assert!(!config.is_rule_enabled("PS-002"));
        assert!(config.is_rule_enabled("PS-001"));
    }

    #[test]
    fn test_toml_deserialization_with_partial_rules() {
        let toml_str = r#"
severity = "Warning"

[rules]
records = true
timeline = false
disabled_rules = ["KEY-002"]
"#;

        let config: CheckConfig = toml::from_str(toml_str).unwrap();

        assert!(!config.rules.timeline);
        assert!(!config.is_rule_enabled("TL-001"));
        assert!(!config.is_rule_enabled("KEY-002"));
        assert!(config.is_rule_enabled("KEY-001"));
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_toml_deserialization_defaults() {
        let toml_str = r#"
severity = "Warning"

[rules]
"#;

        let config: CheckConfig = toml::from_str(toml_str).unwrap();

        assert!(config.rules.document);
        assert!(config.rules.keys);
        assert!(config.rules.records);
        assert!(config.rules.parser_settings);
        assert!(config.rules.timeline);
        assert!(config.rules.disabled_rules.is_empty());
    }

    #[test]
    fn test_default_severity_drops_info() {
        let config = CheckConfig::default();

        assert!(config.includes_level(DiagnosticLevel::Error));
        assert!(config.includes_level(DiagnosticLevel::Warning));
        assert!(!config.includes_level(DiagnosticLevel::Info));
    }

    #[test]
    fn test_error_severity_keeps_only_errors() {
        let mut config = CheckConfig::default();
        config.severity = SeverityLevel::Error;

        assert!(config.includes_level(DiagnosticLevel::Error));
        assert!(!config.includes_level(DiagnosticLevel::Warning));
        assert!(!config.includes_level(DiagnosticLevel::Info));
    }

    #[test]
    fn test_info_severity_keeps_everything() {
        let mut config = CheckConfig::default();
        config.severity = SeverityLevel::Info;

        assert!(config.includes_level(DiagnosticLevel::Error));
        assert!(config.includes_level(DiagnosticLevel::Warning));
        assert!(config.includes_level(DiagnosticLevel::Info));
    }

    #[test]
    fn test_max_file_size_override() {
        let toml_str = r#"
severity = "Error"
max_file_size = 2048

[rules]
"#;

        let config: CheckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(config.severity, SeverityLevel::Error);
    }
}
