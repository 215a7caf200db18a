//! Composite history keys
//!
//! The console keys `import.local` entries by `repository;;source`, e.g.
//! `LIBRARY;;books.ttl`. The separator is literal; neither part may be empty.

use crate::diagnostics::KeyError;
use std::fmt;
use std::str::FromStr;

/// Separator between the repository and source parts of a composite key
pub const KEY_SEPARATOR: &str = ";;";

/// A parsed `repository;;source` composite key.
///
/// Ordering is by repository, then source, which gives stable listing order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportKey {
    pub repository: String,
    pub source: String,
}

impl ImportKey {
    pub fn new(repository: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            source: source.into(),
        }
    }
}

impl FromStr for ImportKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (repository, source) = s
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| KeyError::MissingSeparator(s.to_string()))?;

        if repository.is_empty() {
            return Err(KeyError::EmptyRepository(s.to_string()));
        }
        if source.is_empty() {
            return Err(KeyError::EmptySource(s.to_string()));
        }

        Ok(Self {
            repository: repository.to_string(),
            source: source.to_string(),
        })
    }
}

impl fmt::Display for ImportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.repository, KEY_SEPARATOR, self.source)
    }
}
