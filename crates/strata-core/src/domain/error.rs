// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::project_name::NameRule;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for reporting after the run)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {rule}")]
    InvalidProjectName { name: String, rule: NameRule },

    #[error("Unknown {kind} '{value}' (expected one of: {})", expected.join(", "))]
    UnknownOption {
        kind: &'static str,
        value: String,
        expected: Vec<&'static str>,
    },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Format Errors
    // ========================================================================
    #[error("Manifest fragment {} is not valid JSON: {reason}", path.display())]
    MalformedFragment { path: PathBuf, reason: String },

    #[error("Manifest fragment {} must contain a JSON object at the top level", path.display())]
    FragmentNotObject { path: PathBuf },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, rule } => vec![
                format!("'{}' was rejected: {}", name, rule),
                "Use lowercase letters, digits, hyphens and underscores".into(),
                "Examples: my-app, web_store, blog2".into(),
            ],
            Self::UnknownOption {
                kind, expected, ..
            } => {
                let mut out = vec![format!("Supported values for {}:", kind)];
                out.extend(expected.iter().map(|v| format!("  • {}", v)));
                out
            }
            Self::MalformedFragment { path, .. } | Self::FragmentNotObject { path } => vec![
                format!("Fix or remove {}", path.display()),
                "The template release may be corrupted; try a different --template-tag".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::UnknownOption { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::MalformedFragment { .. } | Self::FragmentNotObject { .. } => {
                ErrorCategory::Format
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Format,
}
