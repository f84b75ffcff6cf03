//! External process adapters: package installation and version control.

mod installer;
mod vcs;

pub use installer::CommandInstaller;
pub use vcs::GitVersionControl;

use std::path::Path;
use std::process::Command;

use strata_core::{application::ApplicationError, error::StrataResult};
use tracing::debug;

/// Run `program args..` in `cwd` and wait for it to exit.
///
/// Output is captured; on failure the last lines of stderr become the error
/// reason.
pub(crate) fn run(program: &str, args: &[&str], cwd: &Path) -> StrataResult<()> {
    let command_line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %command_line, cwd = %cwd.display(), "Running");

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| ApplicationError::ExternalProcess {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
    let reason = if tail.is_empty() {
        output.status.to_string()
    } else {
        format!("{}: {}", output.status, tail)
    };

    Err(ApplicationError::ExternalProcess {
        command: command_line,
        reason,
    }
    .into())
}

const STDERR_TAIL_LINES: usize = 5;
