//! Project name validation.
//!
//! Names end up as a directory name and as the `name` field of the generated
//! `package.json`, so they follow the npm package-name rules the templates
//! were written against. Rules are checked in a fixed order and the first
//! failure wins; callers never see more than one reason.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Longest accepted name, in UTF-16 code units.
pub const MAX_NAME_LENGTH: usize = 214;

/// Names that collide with files or directories a web project relies on.
pub const RESERVED_NAMES: [&str; 2] = ["node_modules", "favicon.ico"];

/// The rule a rejected name failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NameRule {
    Required,
    TooLong,
    NotLowercase,
    InvalidCharacters,
    LeadingDotOrUnderscore,
    Reserved,
}

impl NameRule {
    /// Human-readable reason shown to the user.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Required => "project name is required",
            Self::TooLong => "project name cannot be longer than 214 characters",
            Self::NotLowercase => "project name must be lowercase",
            Self::InvalidCharacters => {
                "project name can only contain lowercase letters, numbers, hyphens, and underscores"
            }
            Self::LeadingDotOrUnderscore => "project name cannot start with a dot or underscore",
            Self::Reserved => "project name cannot be \"node_modules\" or \"favicon.ico\"",
        }
    }
}

impl fmt::Display for NameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Check `candidate` against every naming rule, stopping at the first failure.
pub fn validate_project_name(candidate: &str) -> Result<(), NameRule> {
    if candidate.is_empty() {
        return Err(NameRule::Required);
    }
    if candidate.encode_utf16().count() > MAX_NAME_LENGTH {
        return Err(NameRule::TooLong);
    }
    if candidate.to_lowercase() != candidate {
        return Err(NameRule::NotLowercase);
    }
    if !candidate
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    {
        return Err(NameRule::InvalidCharacters);
    }
    // `.` can never get past the character check; kept so the rule stands on its own.
    if candidate.starts_with('.') || candidate.starts_with('_') {
        return Err(NameRule::LeadingDotOrUnderscore);
    }
    if RESERVED_NAMES.contains(&candidate) {
        return Err(NameRule::Reserved);
    }
    Ok(())
}

/// A project name that passed [`validate_project_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(candidate: impl Into<String>) -> Result<Self, DomainError> {
        let name = candidate.into();
        match validate_project_name(&name) {
            Ok(()) => Ok(Self(name)),
            Err(rule) => Err(DomainError::InvalidProjectName { name, rule }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
