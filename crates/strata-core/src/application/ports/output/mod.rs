//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `strata-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{PackageManager, ProvisionStep};
use crate::error::StrataResult;

/// Kind of a directory entry, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
///
/// `read_dir` makes no ordering promise; callers that need determinism sort.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// List the immediate children of a directory.
    fn read_dir(&self, path: &Path) -> StrataResult<Vec<DirEntry>>;

    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> StrataResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> StrataResult<()>;

    /// Copy a file byte for byte, replacing the destination if present.
    fn copy_file(&self, from: &Path, to: &Path) -> StrataResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> StrataResult<()>;
}

/// Port for the remote template bundle.
///
/// Implemented by:
/// - `strata_adapters::template_source::GitTemplateSource` (release tags of a git repo)
/// - `strata_adapters::template_source::LocalTemplateSource` (a directory on disk)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Newest available release tag.
    fn resolve_latest_tag(&self) -> StrataResult<String>;

    /// Make the release available under `cache_dir` and return the bundle
    /// root (the directory containing `base/` and `overlays/`).
    fn fetch_and_extract(&self, tag: &str, cache_dir: &Path) -> StrataResult<PathBuf>;
}

/// Port for dependency installation.
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    /// Run `<pm> install` in `cwd`. Success or failure is the only signal.
    fn install(&self, package_manager: PackageManager, cwd: &Path) -> StrataResult<()>;
}

/// Port for version control initialization.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    fn init(&self, cwd: &Path) -> StrataResult<()>;

    fn stage_all(&self, cwd: &Path) -> StrataResult<()>;

    fn commit(&self, cwd: &Path, message: &str) -> StrataResult<()>;
}

/// Port for run progress.
///
/// Replaces a process-wide spinner: the orchestrator reports every state
/// transition here and the CLI decides how to show it.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    fn step_started(&self, step: &ProvisionStep);

    fn step_finished(&self, step: &ProvisionStep);

    fn step_skipped(&self, step: &ProvisionStep);

    /// Non-fatal failure; the run continues.
    fn step_warned(&self, step: &ProvisionStep, message: &str);

    /// Fatal failure; the run stops after this call.
    fn step_failed(&self, step: &ProvisionStep, message: &str);
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step_started(&self, _step: &ProvisionStep) {}

    fn step_finished(&self, _step: &ProvisionStep) {}

    fn step_skipped(&self, _step: &ProvisionStep) {}

    fn step_warned(&self, _step: &ProvisionStep, _message: &str) {}

    fn step_failed(&self, _step: &ProvisionStep, _message: &str) {}
}
