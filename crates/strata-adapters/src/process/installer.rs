//! Dependency installation through the selected package manager.

use std::path::Path;

use strata_core::{
    application::ports::PackageInstaller, domain::PackageManager, error::StrataResult,
};
use tracing::{info, instrument};

/// Runs `<pm> install` as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInstaller;

impl CommandInstaller {
    pub fn new() -> Self {
        Self
    }
}

impl PackageInstaller for CommandInstaller {
    #[instrument(skip_all, fields(pm = %package_manager, cwd = %cwd.display()))]
    fn install(&self, package_manager: PackageManager, cwd: &Path) -> StrataResult<()> {
        super::run(package_manager.program(), &["install"], cwd)?;
        info!("Dependencies installed");
        Ok(())
    }
}
