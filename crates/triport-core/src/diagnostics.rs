//! Diagnostic types and error reporting

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type StateResult<T> = Result<T, StateError>;

/// A diagnostic message from the structural checker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub file: PathBuf,
    /// Composite history key the diagnostic refers to, if any
    pub key: Option<String>,
    pub rule: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl Diagnostic {
    pub fn error(file: PathBuf, rule: &str, message: String) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message,
            file,
            key: None,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn warning(file: PathBuf, rule: &str, message: String) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message,
            file,
            key: None,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn info(file: PathBuf, rule: &str, message: String) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message,
            file,
            key: None,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

/// State file errors
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to read symlink: {path}")]
    FileSymlink { path: PathBuf },

    #[error("Not a regular file: {path}")]
    FileNotRegular { path: PathBuf },

    #[error("File too big: {path} ({size} bytes, limit {limit})")]
    FileTooBig { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse state file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize state document")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid composite key: {0}")]
    Key(#[from] KeyError),

    #[error("Key '{key}' names source '{key_source}' but the record is named '{name}'")]
    KeyMismatch {
        key: String,
        key_source: String,
        name: String,
    },

    #[error("No import record under key '{key}'")]
    UnknownKey { key: String },
}

/// Composite key parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("missing ';;' separator in '{0}'")]
    MissingSeparator(String),

    #[error("empty repository part in '{0}'")]
    EmptyRepository(String),

    #[error("empty source part in '{0}'")]
    EmptySource(String),
}
