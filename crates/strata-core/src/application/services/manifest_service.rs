//! Manifest Merge - the I/O half of `domain::manifest`.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::FragmentCollector},
    domain::{
        ManifestFragment, ProjectName,
        manifest::{MANIFEST_FILE_NAME, compose_manifest, render_manifest},
    },
    error::StrataResult,
};

/// What a successful merge consumed and produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub manifest_path: PathBuf,
    pub fragments: Vec<PathBuf>,
}

/// Folds every fragment in a composed tree into the root `package.json`.
pub struct ManifestService<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> ManifestService<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Merge, write `package.json`, then delete the fragments.
    ///
    /// Every fragment is read and parsed before anything is written, so a
    /// malformed fragment leaves the tree exactly as it was.
    #[instrument(skip_all, fields(project = %name, root = %project_root.display()))]
    pub fn merge(&self, project_root: &Path, name: &ProjectName) -> StrataResult<MergeSummary> {
        let paths = FragmentCollector::new(self.fs).collect(project_root)?;
        if paths.is_empty() {
            return Err(ApplicationError::NoManifestFragments {
                root: project_root.to_path_buf(),
            }
            .into());
        }

        let fragments = paths
            .iter()
            .map(|path| {
                self.fs
                    .read_to_string(path)
                    .map(|raw| ManifestFragment::new(path.clone(), raw))
            })
            .collect::<StrataResult<Vec<_>>>()?;

        let manifest = compose_manifest(&fragments, name)?;

        let manifest_path = project_root.join(MANIFEST_FILE_NAME);
        self.fs
            .write_file(&manifest_path, render_manifest(&manifest).as_bytes())?;

        for path in &paths {
            self.fs.remove_file(path)?;
        }

        info!(
            fragments = paths.len(),
            keys = manifest.len(),
            "Manifest merged"
        );

        Ok(MergeSummary {
            manifest_path,
            fragments: paths,
        })
    }
}
