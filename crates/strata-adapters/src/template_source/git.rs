//! Git-backed template source.
//!
//! Uses the system `git`, so SSH keys, credential helpers and tokens
//! configured for the user all apply.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use strata_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::StrataResult,
};
use tracing::{debug, info, instrument};

use super::{bundle_root, cache_key, highest_semver_tag};
use crate::filesystem::map_io_error;

/// Repository used when no other source is configured.
pub const DEFAULT_TEMPLATE_REPOSITORY: &str =
    "https://github.com/vhosztafi/next-starter-templates";

/// Template releases are the repository's semver tags.
#[derive(Debug, Clone)]
pub struct GitTemplateSource {
    repository: String,
}

impl GitTemplateSource {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// All tag names advertised by the remote.
    fn list_tags(&self) -> StrataResult<Vec<String>> {
        let output = Command::new("git")
            .args(["ls-remote", "--tags", "--refs", &self.repository])
            .output()
            .map_err(|e| self.fetch_error("latest", e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.fetch_error("latest", stderr.trim().to_string()));
        }

        // <hash>\trefs/tags/<tag>
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter_map(|line| line.split_once('\t'))
            .filter_map(|(_, reference)| reference.strip_prefix("refs/tags/"))
            .map(str::to_string)
            .collect())
    }

    fn clone_shallow(&self, tag: &str, target: &Path) -> StrataResult<()> {
        if target.exists() {
            fs::remove_dir_all(target).map_err(|e| map_io_error(target, e, "clear cache"))?;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create cache"))?;
        }

        let output = Command::new("git")
            .args(["clone", "--depth=1", "--branch", tag, &self.repository])
            .arg(target)
            .output()
            .map_err(|e| self.fetch_error(tag, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = if stderr.contains("Authentication failed")
                || stderr.contains("Permission denied")
                || stderr.contains("Could not read from remote repository")
            {
                format!(
                    "authentication failed, check your access to {}: {}",
                    self.repository,
                    stderr.trim()
                )
            } else {
                stderr.trim().to_string()
            };
            return Err(self.fetch_error(tag, reason));
        }
        Ok(())
    }

    fn fetch_error(&self, tag: &str, reason: String) -> strata_core::error::StrataError {
        ApplicationError::TemplateFetch {
            tag: tag.to_string(),
            reason,
        }
        .into()
    }
}

impl Default for GitTemplateSource {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_REPOSITORY)
    }
}

impl TemplateSource for GitTemplateSource {
    #[instrument(skip_all, fields(repository = %self.repository))]
    fn resolve_latest_tag(&self) -> StrataResult<String> {
        let tags = self.list_tags()?;
        debug!(count = tags.len(), "Remote tags listed");
        highest_semver_tag(&tags).ok_or_else(|| {
            self.fetch_error(
                "latest",
                format!("no published semver release tags found in {}", self.repository),
            )
        })
    }

    #[instrument(skip_all, fields(repository = %self.repository, tag = %tag))]
    fn fetch_and_extract(&self, tag: &str, cache_dir: &Path) -> StrataResult<PathBuf> {
        let target = cache_dir.join(cache_key(tag));

        // Tags are immutable releases; a populated checkout is reused.
        if target.join(".git").is_dir() {
            debug!(path = %target.display(), "Using cached template checkout");
        } else {
            info!(path = %target.display(), "Cloning templates");
            self.clone_shallow(tag, &target)?;
        }

        Ok(bundle_root(&target))
    }
}
