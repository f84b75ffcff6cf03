//! Repository initialization through the system `git`.

use std::path::Path;

use strata_core::{application::ports::VersionControl, error::StrataResult};

/// Branch created by `init`.
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Clone, Copy, Default)]
pub struct GitVersionControl;

impl GitVersionControl {
    pub fn new() -> Self {
        Self
    }
}

impl VersionControl for GitVersionControl {
    fn init(&self, cwd: &Path) -> StrataResult<()> {
        super::run("git", &["init", "-b", DEFAULT_BRANCH], cwd)
    }

    fn stage_all(&self, cwd: &Path) -> StrataResult<()> {
        super::run("git", &["add", "-A"], cwd)
    }

    fn commit(&self, cwd: &Path, message: &str) -> StrataResult<()> {
        super::run("git", &["commit", "-m", message], cwd)
    }
}
