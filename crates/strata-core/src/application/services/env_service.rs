//! Environment Synthesizer.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::AuthProvider,
    error::StrataResult,
};

/// Template env file shipped by the base layer.
pub const ENV_TEMPLATE_FILE: &str = "env.example";

/// Local env file the project reads at runtime.
pub const ENV_LOCAL_FILE: &str = ".env.local";

/// Provider setup notes contributed by an auth overlay.
pub const PROVIDER_DOC_FILE: &str = "README.addon.md";

/// Result of [`EnvService::synthesize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvOutcome {
    Written,
    /// `.env.local` already existed and was left untouched.
    Preserved,
}

/// Creates `.env.local` from `env.example` without ever clobbering it.
pub struct EnvService<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> EnvService<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    #[instrument(skip_all, fields(root = %project_root.display(), provider = %provider))]
    pub fn synthesize(
        &self,
        project_root: &Path,
        provider: AuthProvider,
    ) -> StrataResult<EnvOutcome> {
        let template_path = project_root.join(ENV_TEMPLATE_FILE);
        if !self.fs.exists(&template_path) {
            return Err(ApplicationError::EnvTemplateMissing {
                path: template_path,
            }
            .into());
        }
        let mut content = self.fs.read_to_string(&template_path)?;

        if provider != AuthProvider::None && self.fs.exists(&project_root.join(PROVIDER_DOC_FILE))
        {
            content.push_str(&provider_block(provider));
        }

        let local_path = project_root.join(ENV_LOCAL_FILE);
        if self.fs.exists(&local_path) {
            debug!("Existing .env.local preserved");
            return Ok(EnvOutcome::Preserved);
        }

        self.fs.write_file(&local_path, content.as_bytes())?;
        Ok(EnvOutcome::Written)
    }
}

fn provider_block(provider: AuthProvider) -> String {
    format!(
        "\n# {provider} specific environment variables\n# See {PROVIDER_DOC_FILE} for details\n"
    )
}
