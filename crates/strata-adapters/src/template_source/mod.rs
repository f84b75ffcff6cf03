//! Template source adapters.
//!
//! A template bundle is a directory holding `base/` and `overlays/<name>/`.
//! Sources differ only in where the bundle comes from.

mod git;
mod local;

pub use git::{DEFAULT_TEMPLATE_REPOSITORY, GitTemplateSource};
pub use local::LocalTemplateSource;

use std::path::{Path, PathBuf};

use semver::Version;

/// Subdirectory that holds the bundle when a repository ships other files too.
pub const TEMPLATES_SUBDIR: &str = "templates";

/// Parse a tag into a semantic version, accepting an optional leading `v`.
pub fn parse_semver_tag(tag: &str) -> Option<Version> {
    let version_str = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(version_str).ok()
}

/// Highest published release among `tags`.
///
/// Tags that do not parse and pre-releases (`v2.0.0-beta.1`) are ignored;
/// a pre-release is only ever used when pinned with `--template-tag`.
pub fn highest_semver_tag<I, S>(tags: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            parse_semver_tag(tag)
                .filter(|v| v.pre.is_empty())
                .map(|v| (v, tag.to_string()))
        })
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, tag)| tag)
}

/// `root/templates` when present, otherwise `root`.
pub(crate) fn bundle_root(root: &Path) -> PathBuf {
    let nested = root.join(TEMPLATES_SUBDIR);
    if nested.is_dir() {
        nested
    } else {
        root.to_path_buf()
    }
}

/// Tags can contain `/`; keep the cache one level deep.
pub(crate) fn cache_key(tag: &str) -> String {
    tag.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v_prefixed_tags() {
        assert_eq!(parse_semver_tag("v1.0.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_semver_tag("2.3.4"), Some(Version::new(2, 3, 4)));
        assert_eq!(parse_semver_tag("v1.0"), None);
        assert_eq!(parse_semver_tag("latest"), None);
    }

    #[test]
    fn highest_tag_uses_semver_not_lexical_order() {
        let tags = ["v1.9.0", "v1.10.0", "nightly", "v1.2.3"];
        assert_eq!(highest_semver_tag(tags).as_deref(), Some("v1.10.0"));
    }

    #[test]
    fn prereleases_are_never_latest() {
        let tags = ["v2.0.0-beta.1", "v1.4.0"];
        assert_eq!(highest_semver_tag(tags).as_deref(), Some("v1.4.0"));
        let tags = ["v2.0.0-beta.1", "v2.0.0"];
        assert_eq!(highest_semver_tag(tags).as_deref(), Some("v2.0.0"));
        assert_eq!(highest_semver_tag(["v3.0.0-rc.1"]), None);
    }

    #[test]
    fn no_semver_tags_yields_none() {
        assert_eq!(highest_semver_tag(["main", "latest"]), None);
    }

    #[test]
    fn cache_key_flattens_separators() {
        assert_eq!(cache_key("release/v1.0.0"), "release_v1.0.0");
    }
}
