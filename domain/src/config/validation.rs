//! Structured configuration issues.
//!
//! The infrastructure layer validates the loaded file configuration and
//! reports what it found as [`ConfigIssue`]s. Errors stop startup, warnings
//! are printed and the session continues.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field holds a value outside its known set.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A URL field is empty or not http(s).
    InvalidUrl { field: String },
    /// A timeout of zero seconds would fail every request.
    ZeroTimeout { field: String },
    /// A configured path does not exist.
    MissingFile { field: String, path: String },
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let err = ConfigIssue::error(
            ConfigIssueCode::ZeroTimeout {
                field: "tutor.timeout_seconds".to_string(),
            },
            "timeout must be positive",
        );
        assert!(err.is_error());
        assert_eq!(err.to_string(), "error: timeout must be positive");

        let warn = ConfigIssue::warning(
            ConfigIssueCode::MissingFile {
                field: "catalog.path".to_string(),
                path: "poems.tsv".to_string(),
            },
            "no such file",
        );
        assert!(!warn.is_error());
        assert_eq!(warn.severity, Severity::Warning);
    }
}
