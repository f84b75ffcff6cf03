//! Template layers: the base tree and the named overlays of a bundle.
//!
//! A bundle root holds `base/` and `overlays/<name>/`. Layers only know
//! their own location; copying them is the composer's job.

use std::fmt;
use std::path::{Path, PathBuf};

/// Directory holding the base layer inside a template bundle.
pub const BASE_LAYER_DIR: &str = "base";

/// Directory holding all overlays inside a template bundle.
pub const OVERLAYS_DIR: &str = "overlays";

/// Overlay directory name for the Storybook add-on.
pub const STORYBOOK_OVERLAY: &str = "storybook";

/// One composable directory tree inside a template bundle.
///
/// Layers are read-only inputs; composing one never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateLayer {
    Base,
    Overlay(String),
}

impl TemplateLayer {
    pub fn overlay(name: impl Into<String>) -> Self {
        Self::Overlay(name.into())
    }

    /// Name used in messages: `base`, or the overlay name (e.g. `ui-shadcn`).
    pub fn name(&self) -> &str {
        match self {
            Self::Base => BASE_LAYER_DIR,
            Self::Overlay(name) => name,
        }
    }

    /// Location relative to the bundle root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Self::Base => PathBuf::from(BASE_LAYER_DIR),
            Self::Overlay(name) => Path::new(OVERLAYS_DIR).join(name),
        }
    }

    pub fn resolve(&self, templates_root: &Path) -> PathBuf {
        templates_root.join(self.relative_path())
    }

    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Overlay(_))
    }
}

impl fmt::Display for TemplateLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base layer"),
            Self::Overlay(name) => write!(f, "overlay '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_resolves_under_root() {
        let root = Path::new("/cache/v1.2.0");
        assert_eq!(TemplateLayer::Base.resolve(root), root.join("base"));
    }

    #[test]
    fn overlay_resolves_under_overlays_dir() {
        let layer = TemplateLayer::overlay("ui-shadcn");
        assert_eq!(layer.name(), "ui-shadcn");
        assert_eq!(
            layer.relative_path(),
            Path::new("overlays").join("ui-shadcn")
        );
        assert!(layer.is_overlay());
    }
}
