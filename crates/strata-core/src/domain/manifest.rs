//! Manifest fragment merging.
//!
//! Every template layer may drop a `package.json.partial` (or a channel
//! fragment such as `package.dependencies.partial`) anywhere in its tree.
//! Fragments fold in collection order: lexicographic, depth first. Overlays
//! name their root fragment `package.overlay.<name>.partial`
//! ([`overlay_fragment_name`]); that sorts after the base
//! `package.json.partial`, so overlay values win over base values.
//!
//! After composition the fragments are folded into one `package.json`:
//!
//! 1. placeholder tokens are replaced in the raw text, once per fragment
//! 2. each fragment is parsed; it must be a JSON object
//! 3. fragments are folded left to right:
//!    - object + object merges recursively
//!    - array + array concatenates (no deduplication)
//!    - anything else: the later value wins
//! 4. top-level keys are reordered: [`CANONICAL_KEY_ORDER`] first, then the
//!    rest in first-seen order
//!
//! Nothing here touches the filesystem; see
//! `application::services::manifest_service` for the I/O side.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::{error::DomainError, project_name::ProjectName};

/// Output manifest written at the project root.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Canonical fragment file name.
pub const FRAGMENT_FILE_NAME: &str = "package.json.partial";

const FRAGMENT_PREFIX: &str = "package.";
const FRAGMENT_SUFFIX: &str = ".partial";
const OVERLAY_CHANNEL_PREFIX: &str = "overlay.";

/// Root fragment file name for an overlay, e.g. `package.overlay.clerk.partial`.
pub fn overlay_fragment_name(overlay: &str) -> String {
    format!("{FRAGMENT_PREFIX}{OVERLAY_CHANNEL_PREFIX}{overlay}{FRAGMENT_SUFFIX}")
}

/// Tokens replaced by the project name before a fragment is parsed.
pub const PLACEHOLDER_TOKENS: [&str; 2] = ["{{PROJECT_NAME}}", "__PROJECT_NAME__"];

/// Priority order for top-level manifest keys.
pub const CANONICAL_KEY_ORDER: [&str; 28] = [
    // identity
    "name",
    "version",
    "description",
    "private",
    // module system and entry points
    "type",
    "main",
    "module",
    "exports",
    "bin",
    // execution
    "engines",
    "scripts",
    // dependency groups
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
    "bundledDependencies",
    // platform
    "os",
    "cpu",
    // publication
    "preferGlobal",
    "publishConfig",
    "repository",
    "bugs",
    "homepage",
    // descriptive metadata
    "keywords",
    "author",
    "contributors",
    "license",
    "files",
];

/// Merged manifest document (top-level object).
pub type ManifestDocument = Map<String, Value>;

/// How a file name qualifies as a manifest fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    /// `package.json.partial`
    Canonical,
    /// `package.<channel>.partial`, e.g. `package.dependencies.partial`
    Channel(String),
}

impl FragmentKind {
    /// Classify a bare file name; `None` if it is not a fragment.
    pub fn classify(file_name: &str) -> Option<Self> {
        if file_name == FRAGMENT_FILE_NAME {
            return Some(Self::Canonical);
        }
        let channel = file_name
            .strip_prefix(FRAGMENT_PREFIX)?
            .strip_suffix(FRAGMENT_SUFFIX)?;
        Some(Self::Channel(channel.to_string()))
    }
}

/// Raw fragment text as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFragment {
    pub path: PathBuf,
    pub raw: String,
}

impl ManifestFragment {
    pub fn new(path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw: raw.into(),
        }
    }

    /// Substitute placeholders and parse into an object.
    pub fn parse(&self, name: &ProjectName) -> Result<ManifestDocument, DomainError> {
        parse_fragment(&self.path, &substitute_placeholders(&self.raw, name))
    }
}

/// Replace every placeholder token with the project name.
pub fn substitute_placeholders(raw: &str, name: &ProjectName) -> String {
    PLACEHOLDER_TOKENS
        .iter()
        .fold(raw.to_string(), |text, token| {
            text.replace(token, name.as_str())
        })
}

fn parse_fragment(path: &Path, text: &str) -> Result<ManifestDocument, DomainError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DomainError::MalformedFragment {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DomainError::FragmentNotObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Merge `incoming` into `acc`.
pub fn deep_merge(acc: &mut ManifestDocument, incoming: ManifestDocument) {
    for (key, value) in incoming {
        match acc.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                acc.insert(key, value);
            }
        }
    }
}

fn merge_value(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(acc), Value::Object(map)) => deep_merge(acc, map),
        (Value::Array(acc), Value::Array(items)) => acc.extend(items),
        (slot, value) => *slot = value,
    }
}

/// Fold documents left to right.
pub fn merge_documents(docs: impl IntoIterator<Item = ManifestDocument>) -> ManifestDocument {
    docs.into_iter().fold(Map::new(), |mut acc, doc| {
        deep_merge(&mut acc, doc);
        acc
    })
}

/// Reorder top-level keys: canonical keys first, the rest in first-seen order.
pub fn canonicalize(doc: ManifestDocument) -> ManifestDocument {
    let mut known: Vec<Option<Value>> = vec![None; CANONICAL_KEY_ORDER.len()];
    let mut rest = Map::new();

    for (key, value) in doc {
        match CANONICAL_KEY_ORDER.iter().position(|k| *k == key) {
            Some(idx) => known[idx] = Some(value),
            None => {
                rest.insert(key, value);
            }
        }
    }

    let mut ordered = Map::with_capacity(known.len() + rest.len());
    for (key, value) in CANONICAL_KEY_ORDER.iter().zip(known) {
        if let Some(value) = value {
            ordered.insert((*key).to_string(), value);
        }
    }
    ordered.extend(rest);
    ordered
}

/// Parse every fragment, then merge and canonicalize.
///
/// All fragments are parsed before merging starts, so a format error leaves
/// the caller with nothing to undo.
pub fn compose_manifest(
    fragments: &[ManifestFragment],
    name: &ProjectName,
) -> Result<ManifestDocument, DomainError> {
    let docs = fragments
        .iter()
        .map(|f| f.parse(name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(canonicalize(merge_documents(docs)))
}

/// Pretty-printed JSON (two-space indent) with a trailing newline.
pub fn render_manifest(doc: &ManifestDocument) -> String {
    format!("{:#}\n", Value::Object(doc.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name() -> ProjectName {
        ProjectName::parse("my-app").unwrap()
    }

    fn doc(value: Value) -> ManifestDocument {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn keys(doc: &ManifestDocument) -> Vec<&str> {
        doc.keys().map(String::as_str).collect()
    }

    // ── classification ─────────────────────────────────────────────────────

    #[test]
    fn classifies_canonical_fragment() {
        assert_eq!(
            FragmentKind::classify("package.json.partial"),
            Some(FragmentKind::Canonical)
        );
    }

    #[test]
    fn classifies_channel_fragment() {
        assert_eq!(
            FragmentKind::classify("package.dependencies.partial"),
            Some(FragmentKind::Channel("dependencies".into()))
        );
    }

    #[test]
    fn overlay_fragment_sorts_after_base_fragment() {
        let overlay = overlay_fragment_name("clerk");
        assert_eq!(overlay, "package.overlay.clerk.partial");
        assert_eq!(
            FragmentKind::classify(&overlay),
            Some(FragmentKind::Channel("overlay.clerk".into()))
        );
        assert!(FRAGMENT_FILE_NAME < overlay.as_str());
        assert!("package.dependencies.partial" < FRAGMENT_FILE_NAME);
    }

    #[test]
    fn ignores_other_files() {
        for name in ["package.json", "package.partial", "my-package.json.partial", "README.md"] {
            assert_eq!(FragmentKind::classify(name), None, "matched: {name}");
        }
    }

    // ── placeholders ───────────────────────────────────────────────────────

    #[test]
    fn substitutes_every_token_occurrence() {
        let raw = r#"{"name":"{{PROJECT_NAME}}","description":"__PROJECT_NAME__ by {{PROJECT_NAME}}"}"#;
        let out = substitute_placeholders(raw, &name());
        assert_eq!(out, r#"{"name":"my-app","description":"my-app by my-app"}"#);
    }

    // ── parsing ────────────────────────────────────────────────────────────

    #[test]
    fn parse_error_names_fragment() {
        let fragment = ManifestFragment::new("overlays/clerk/package.json.partial", "{ nope");
        let err = fragment.parse(&name()).unwrap_err();
        match err {
            DomainError::MalformedFragment { path, .. } => {
                assert_eq!(path, PathBuf::from("overlays/clerk/package.json.partial"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_object_fragment_is_rejected() {
        let fragment = ManifestFragment::new("package.json.partial", "[1, 2]");
        assert!(matches!(
            fragment.parse(&name()),
            Err(DomainError::FragmentNotObject { .. })
        ));
    }

    // ── merging ────────────────────────────────────────────────────────────

    #[test]
    fn objects_merge_recursively() {
        let merged = merge_documents([
            doc(json!({"dependencies": {"react": "^18"}})),
            doc(json!({"dependencies": {"next-auth": "^5"}})),
        ]);
        assert_eq!(
            Value::Object(merged),
            json!({"dependencies": {"react": "^18", "next-auth": "^5"}})
        );
    }

    #[test]
    fn arrays_concatenate_without_dedup() {
        let merged = merge_documents([
            doc(json!({"files": ["dist", "src"]})),
            doc(json!({"files": ["dist"]})),
        ]);
        assert_eq!(merged["files"], json!(["dist", "src", "dist"]));
    }

    #[test]
    fn later_scalar_wins() {
        let merged = merge_documents([
            doc(json!({"version": "0.0.0", "private": true})),
            doc(json!({"version": "1.0.0"})),
        ]);
        assert_eq!(merged["version"], json!("1.0.0"));
        assert_eq!(merged["private"], json!(true));
    }

    #[test]
    fn mismatched_kinds_override() {
        let merged = merge_documents([
            doc(json!({"bin": "cli.js", "scripts": ["build"]})),
            doc(json!({"bin": {"app": "cli.js"}, "scripts": {"dev": "next dev"}})),
        ]);
        assert_eq!(merged["bin"], json!({"app": "cli.js"}));
        assert_eq!(merged["scripts"], json!({"dev": "next dev"}));
    }

    #[test]
    fn merge_is_associative() {
        let a = doc(json!({"scripts": {"dev": "next dev"}, "files": ["a"], "version": "1"}));
        let b = doc(json!({"scripts": {"lint": "eslint"}, "files": ["b"], "version": "2"}));
        let c = doc(json!({"scripts": {"dev": "vite"}, "files": ["c"], "private": true}));

        let flat = merge_documents([a.clone(), b.clone(), c.clone()]);
        let nested = merge_documents([merge_documents([a, b]), c]);
        assert_eq!(flat, nested);
        assert_eq!(keys(&flat), keys(&nested));
    }

    // ── canonical order ────────────────────────────────────────────────────

    #[test]
    fn canonical_keys_come_first_then_first_seen() {
        let ordered = canonicalize(doc(json!({
            "zeta": 1,
            "dependencies": {},
            "alpha": 2,
            "name": "x",
            "scripts": {},
        })));
        assert_eq!(
            keys(&ordered),
            vec!["name", "scripts", "dependencies", "zeta", "alpha"]
        );
    }

    #[test]
    fn key_order_independent_of_fragment_order() {
        let a = doc(json!({"dependencies": {"react": "^18"}, "name": "a", "custom": 1}));
        let b = doc(json!({"scripts": {"dev": "next dev"}, "version": "1.0.0", "custom": 2}));

        let ab = canonicalize(merge_documents([a.clone(), b.clone()]));
        let ba = canonicalize(merge_documents([b, a]));
        assert_eq!(keys(&ab), keys(&ba));
        assert_eq!(ab["custom"], json!(2));
        assert_eq!(ba["custom"], json!(1));
    }

    #[test]
    fn base_plus_overlay_scenario() {
        let base = ManifestFragment::new(
            "package.json.partial",
            r#"{"name": "", "version": "0.0.0", "dependencies": {"react": "^18"}}"#,
        );
        let overlay = ManifestFragment::new(
            "auth/package.json.partial",
            r#"{"name": "__PROJECT_NAME__", "dependencies": {"next-auth": "^5"}, "scripts": ["build"]}"#,
        );

        for fragments in [
            vec![base.clone(), overlay.clone()],
            vec![overlay.clone(), base.clone()],
        ] {
            let manifest = compose_manifest(&fragments, &name()).unwrap();
            assert_eq!(keys(&manifest), vec!["name", "version", "scripts", "dependencies"]);
            assert_eq!(
                manifest["dependencies"],
                json!({"react": "^18", "next-auth": "^5"})
            );
        }

        let manifest = compose_manifest(&[base, overlay], &name()).unwrap();
        assert_eq!(manifest["name"], json!("my-app"));
    }

    #[test]
    fn one_bad_fragment_fails_whole_compose() {
        let fragments = [
            ManifestFragment::new("a/package.json.partial", r#"{"name": "ok"}"#),
            ManifestFragment::new("b/package.json.partial", "not json"),
        ];
        assert!(compose_manifest(&fragments, &name()).is_err());
    }

    #[test]
    fn render_is_pretty_with_trailing_newline() {
        let rendered = render_manifest(&doc(json!({"name": "my-app", "private": true})));
        assert_eq!(rendered, "{\n  \"name\": \"my-app\",\n  \"private\": true\n}\n");
    }
}
