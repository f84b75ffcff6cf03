//! Directory Composer - copies one template layer onto the project tree.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::TemplateLayer,
    error::StrataResult,
};

/// Counts of what a single composition copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    pub files: usize,
    pub directories: usize,
}

/// Copies layers byte for byte. Later layers overwrite earlier files at the
/// same relative path.
pub struct DirectoryComposer<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> DirectoryComposer<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Copy `layer` (resolved under `templates_root`) into `destination`.
    #[instrument(skip_all, fields(layer = %layer.name(), destination = %destination.display()))]
    pub fn compose_layer(
        &self,
        layer: &TemplateLayer,
        templates_root: &Path,
        destination: &Path,
    ) -> StrataResult<ComposeStats> {
        let source = layer.resolve(templates_root);
        if !self.fs.is_dir(&source) {
            return Err(ApplicationError::LayerNotFound {
                layer: layer.name().to_string(),
                path: source,
            }
            .into());
        }
        self.compose(&source, destination)
    }

    /// Recursively copy every file and directory under `source` into `destination`.
    pub fn compose(&self, source: &Path, destination: &Path) -> StrataResult<ComposeStats> {
        let mut stats = ComposeStats::default();
        self.fs.create_dir_all(destination)?;

        let mut pending: Vec<(PathBuf, PathBuf)> =
            vec![(source.to_path_buf(), destination.to_path_buf())];

        while let Some((from_dir, to_dir)) = pending.pop() {
            for entry in self.fs.read_dir(&from_dir)? {
                let target = to_dir.join(&entry.file_name);
                if entry.is_dir() {
                    self.fs.create_dir_all(&target)?;
                    stats.directories += 1;
                    pending.push((entry.path, target));
                } else {
                    self.fs.copy_file(&entry.path, &target)?;
                    stats.files += 1;
                }
            }
        }

        debug!(
            files = stats.files,
            directories = stats.directories,
            "Layer composed"
        );
        Ok(stats)
    }
}
