//! Domain value objects: PackageManager, AuthProvider, UiLibrary.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each knows its string form, its parser, and which overlay (if any) it
//! selects. Overlay naming lives here so the orchestrator never builds
//! overlay paths from raw strings.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant and its `as_str` arm
//! 2. Add it to `ALL`
//! 3. Ship an `overlays/<name>` layer in the template release

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PackageManager ───────────────────────────────────────────────────────────

/// The package manager used to install the generated project's dependencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Pnpm,
    Npm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [Self; 4] = [Self::Pnpm, Self::Npm, Self::Yarn, Self::Bun];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pnpm => "pnpm",
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Executable name; identical to the display name for every supported manager.
    pub const fn program(&self) -> &'static str {
        self.as_str()
    }

    /// Command a user types to start the dev server.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            other => format!("{} {script}", other.as_str()),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, "package manager", &Self::ALL, Self::as_str)
    }
}

// ── AuthProvider ─────────────────────────────────────────────────────────────

/// Authentication provider overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    None,
    #[default]
    Authjs,
    Clerk,
    Auth0,
    Supabase,
    Msal,
}

impl AuthProvider {
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Authjs,
        Self::Clerk,
        Self::Auth0,
        Self::Supabase,
        Self::Msal,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Authjs => "authjs",
            Self::Clerk => "clerk",
            Self::Auth0 => "auth0",
            Self::Supabase => "supabase",
            Self::Msal => "msal",
        }
    }

    /// Label used in prompts.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Authjs => "Auth.js (NextAuth)",
            Self::Clerk => "Clerk",
            Self::Auth0 => "Auth0",
            Self::Supabase => "Supabase",
            Self::Msal => "MSAL (Azure AD)",
        }
    }

    /// Overlay directory under `overlays/`, or `None` when no overlay applies.
    pub fn overlay(&self) -> Option<String> {
        match self {
            Self::None => None,
            other => Some(other.as_str().to_string()),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, "auth provider", &Self::ALL, Self::as_str)
    }
}

// ── UiLibrary ────────────────────────────────────────────────────────────────

/// Component library overlay.
///
/// `Headless` is the template's built-in baseline and needs no overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLibrary {
    #[default]
    None,
    Headless,
    Shadcn,
    Mui,
    Chakra,
    Mantine,
}

impl UiLibrary {
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Headless,
        Self::Shadcn,
        Self::Mui,
        Self::Chakra,
        Self::Mantine,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Headless => "headless",
            Self::Shadcn => "shadcn",
            Self::Mui => "mui",
            Self::Chakra => "chakra",
            Self::Mantine => "mantine",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Headless => "Headless (template default)",
            Self::Shadcn => "shadcn/ui",
            Self::Mui => "Material UI",
            Self::Chakra => "Chakra UI",
            Self::Mantine => "Mantine",
        }
    }

    /// Overlay directory under `overlays/` (`ui-<name>`), or `None` for baselines.
    pub fn overlay(&self) -> Option<String> {
        match self {
            Self::None | Self::Headless => None,
            other => Some(format!("ui-{}", other.as_str())),
        }
    }
}

impl fmt::Display for UiLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiLibrary {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, "UI library", &Self::ALL, Self::as_str)
    }
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn parse_choice<T: Copy>(
    input: &str,
    kind: &'static str,
    all: &[T],
    as_str: fn(&T) -> &'static str,
) -> Result<T, DomainError> {
    let wanted = input.trim().to_ascii_lowercase();
    all.iter()
        .find(|v| as_str(*v) == wanted)
        .copied()
        .ok_or_else(|| DomainError::UnknownOption {
            kind,
            value: input.to_string(),
            expected: all.iter().map(as_str).collect(),
        })
}
