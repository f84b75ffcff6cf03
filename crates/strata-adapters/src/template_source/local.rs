//! Template source backed by a directory on disk.

use std::fs;
use std::path::{Path, PathBuf};

use strata_core::{
    application::{ApplicationError, ports::TemplateSource},
    domain::layer::BASE_LAYER_DIR,
    error::StrataResult,
};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use super::{bundle_root, cache_key, highest_semver_tag};
use crate::filesystem::map_io_error;

/// Tag reported for a directory that is itself a single bundle.
pub const UNVERSIONED_TAG: &str = "local";

/// Either a single bundle (`<root>/base` exists) or a directory of
/// per-release bundles named by tag (`<root>/v1.2.0/base`).
///
/// The chosen bundle is snapshotted into the cache, so edits to the source
/// directory during a run do not leak into the project.
#[derive(Debug, Clone)]
pub struct LocalTemplateSource {
    root: PathBuf,
}

impl LocalTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_single_bundle(&self) -> bool {
        bundle_root(&self.root).join(BASE_LAYER_DIR).is_dir()
    }

    fn release_dir(&self, tag: &str) -> PathBuf {
        if self.is_single_bundle() {
            bundle_root(&self.root)
        } else {
            bundle_root(&self.root.join(tag))
        }
    }

    fn missing(&self, tag: &str, reason: String) -> strata_core::error::StrataError {
        ApplicationError::TemplateFetch {
            tag: tag.to_string(),
            reason,
        }
        .into()
    }
}

impl TemplateSource for LocalTemplateSource {
    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn resolve_latest_tag(&self) -> StrataResult<String> {
        if self.is_single_bundle() {
            return Ok(UNVERSIONED_TAG.to_string());
        }

        let entries = fs::read_dir(&self.root)
            .map_err(|e| self.missing("latest", format!("{}: {e}", self.root.display())))?;
        let tags: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();

        highest_semver_tag(&tags).ok_or_else(|| {
            self.missing(
                "latest",
                format!("no release directories under {}", self.root.display()),
            )
        })
    }

    #[instrument(skip_all, fields(root = %self.root.display(), tag = %tag))]
    fn fetch_and_extract(&self, tag: &str, cache_dir: &Path) -> StrataResult<PathBuf> {
        if self.is_single_bundle() && tag != UNVERSIONED_TAG {
            return Err(self.missing(
                tag,
                format!(
                    "{} is a single unversioned bundle; only the tag '{UNVERSIONED_TAG}' applies",
                    self.root.display()
                ),
            ));
        }
        let source = self.release_dir(tag);
        if !source.is_dir() {
            return Err(self.missing(tag, format!("{} does not exist", source.display())));
        }

        let target = cache_dir.join(format!("local-{}", cache_key(tag)));
        if target.exists() {
            fs::remove_dir_all(&target).map_err(|e| map_io_error(&target, e, "clear cache"))?;
        }

        let mut copied = 0usize;
        for entry in WalkDir::new(&source).follow_links(true) {
            let entry = entry.map_err(|e| self.missing(tag, e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(&source)
                .map_err(|e| self.missing(tag, e.to_string()))?;
            let dest = target.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| map_io_error(&dest, e, "create directory"))?;
            } else {
                fs::copy(entry.path(), &dest).map_err(|e| map_io_error(&dest, e, "copy file"))?;
                copied += 1;
            }
        }

        debug!(files = copied, path = %target.display(), "Template snapshot written");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn single_bundle_is_unversioned() {
        let src = TempDir::new().unwrap();
        write(&src.path().join("base/env.example"), "A=1\n");

        let source = LocalTemplateSource::new(src.path());
        assert_eq!(source.resolve_latest_tag().unwrap(), UNVERSIONED_TAG);
    }

    #[test]
    fn picks_highest_release_directory() {
        let src = TempDir::new().unwrap();
        write(&src.path().join("v1.2.0/base/a"), "");
        write(&src.path().join("v1.10.0/base/a"), "");
        write(&src.path().join("scratch/notes"), "");

        let source = LocalTemplateSource::new(src.path());
        assert_eq!(source.resolve_latest_tag().unwrap(), "v1.10.0");
    }

    #[test]
    fn prerelease_directory_is_not_latest() {
        let src = TempDir::new().unwrap();
        write(&src.path().join("v1.0.0/base/a"), "");
        write(&src.path().join("v2.0.0-rc.1/base/a"), "");

        let source = LocalTemplateSource::new(src.path());
        assert_eq!(source.resolve_latest_tag().unwrap(), "v1.0.0");
    }

    #[test]
    fn single_bundle_rejects_other_tags() {
        let src = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        write(&src.path().join("base/env.example"), "A=1\n");
        let source = LocalTemplateSource::new(src.path());

        let err = source
            .fetch_and_extract("v9.9.9", cache.path())
            .unwrap_err();
        assert!(err.to_string().contains("v9.9.9"));

        let root = source
            .fetch_and_extract(UNVERSIONED_TAG, cache.path())
            .unwrap();
        assert!(root.join("base/env.example").is_file());
    }

    #[test]
    fn snapshot_copies_nested_templates_dir() {
        let src = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        write(&src.path().join("v1.0.0/templates/base/env.example"), "A=1\n");
        write(
            &src.path().join("v1.0.0/templates/overlays/clerk/README.addon.md"),
            "clerk",
        );

        let source = LocalTemplateSource::new(src.path());
        let root = source.fetch_and_extract("v1.0.0", cache.path()).unwrap();

        assert!(root.starts_with(cache.path()));
        assert_eq!(
            fs::read_to_string(root.join("base/env.example")).unwrap(),
            "A=1\n"
        );
        assert!(root.join("overlays/clerk/README.addon.md").is_file());
    }

    #[test]
    fn unknown_tag_is_fetch_error() {
        let src = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        write(&src.path().join("v1.0.0/base/a"), "");

        let err = LocalTemplateSource::new(src.path())
            .fetch_and_extract("v9.9.9", cache.path())
            .unwrap_err();
        assert!(err.to_string().contains("v9.9.9"));
    }
}
