//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not rule
//! violations. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while provisioning a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Destination directory is already taken.
    #[error("Directory {} already exists", path.display())]
    ProjectExists { path: PathBuf },

    /// Base layer or overlay missing from the template bundle.
    #[error("Template layer '{layer}' not found at {}", path.display())]
    LayerNotFound { layer: String, path: PathBuf },

    /// Composed tree contains no manifest fragments.
    #[error("No manifest fragments found in template under {}", root.display())]
    NoManifestFragments { root: PathBuf },

    /// Template environment file is missing from the composed tree.
    #[error("Environment template not found at {}", path.display())]
    EnvTemplateMissing { path: PathBuf },

    /// Template release could not be resolved or downloaded.
    #[error("Failed to fetch templates ({tag}): {reason}")]
    TemplateFetch { tag: String, reason: String },

    /// An external command could not be started or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason}")]
    ExternalProcess { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove it first: rm -rf {}", path.display()),
            ],
            Self::LayerNotFound { layer, .. } => vec![
                format!("The selected template release has no '{}' layer", layer),
                "Pick a different option, or pin a release that ships it with --template-tag".into(),
            ],
            Self::NoManifestFragments { .. } => vec![
                "The template release is malformed: it contributes no package.json.partial".into(),
                "Try a different --template-tag".into(),
            ],
            Self::EnvTemplateMissing { .. } => vec![
                "The base template must ship an env.example file".into(),
                "Try a different --template-tag".into(),
            ],
            Self::TemplateFetch { .. } => vec![
                "Check your network connection and that git is installed".into(),
                "Use --templates-dir to provision from a local template bundle".into(),
            ],
            Self::ExternalProcess { command, .. } => vec![
                format!("Ensure `{}` is installed and on your PATH", command),
                "Re-run with --no-install to skip dependency installation".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::InvalidInput,
            Self::LayerNotFound { .. }
            | Self::NoManifestFragments { .. }
            | Self::EnvTemplateMissing { .. } => ErrorCategory::NotFound,
            Self::TemplateFetch { .. } | Self::ExternalProcess { .. } => {
                ErrorCategory::ExternalProcess
            }
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
