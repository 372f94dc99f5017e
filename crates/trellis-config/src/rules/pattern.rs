use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A compiled resource pattern, serialized as its source text.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    source: String,
    case_insensitive: bool,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        Self::build(source, false)
    }

    /// Case-insensitive pattern (`/.../i`).
    pub fn insensitive(source: &str) -> Result<Self> {
        Self::build(source, true)
    }

    fn build(source: &str, case_insensitive: bool) -> Result<Self> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|source_err| ConfigError::InvalidPattern {
                pattern: source.to_string(),
                source: source_err,
            })?;
        Ok(Self {
            regex,
            source: source.to_string(),
            case_insensitive,
        })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.case_insensitive == other.case_insensitive
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = if self.case_insensitive { "i" } else { "" };
        write!(f, "/{}/{flags}", self.source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insensitive_pattern_ignores_case() {
        let pattern = Pattern::insensitive(r"\.html?$").unwrap();
        assert!(pattern.is_match("views/Shell.HTML"));
        assert!(pattern.is_match("index.htm"));
        assert!(!pattern.is_match("index.html.js"));
    }

    #[test]
    fn displays_with_flags() {
        let pattern = Pattern::insensitive(r"\.json$").unwrap();
        assert_eq!(pattern.to_string(), r"/\.json$/i");
        assert_eq!(Pattern::new(r"\.scss$").unwrap().to_string(), r"/\.scss$/");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = Pattern::new("(unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
