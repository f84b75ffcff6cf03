//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use strata_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, EntryKind, Filesystem},
    },
    error::{StrataError, StrataResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle and inspect what
/// a service wrote through its boxed copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn require_parent(&self, path: &Path) -> StrataResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.directories.contains(parent) => {
                Err(not_found(path, "Parent directory does not exist"))
            }
            _ => Ok(()),
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> &Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_dir_chain(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All file paths under `root`, sorted.
    pub fn list_files(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.inner
            .read()
            .map(|inner| {
                inner
                    .files
                    .keys()
                    .filter(|p| p.starts_with(root))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn read(&self) -> StrataResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> StrataResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Err(not_found(path, "A file exists at this path"));
        }
        inner.add_dir_chain(path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> StrataResult<Vec<DirEntry>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "No such directory"));
        }

        let child = |p: &PathBuf, kind| {
            (p.parent() == Some(path)).then(|| DirEntry {
                path: p.clone(),
                file_name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                kind,
            })
        };

        Ok(inner
            .directories
            .iter()
            .filter_map(|p| child(p, EntryKind::Directory))
            .chain(inner.files.keys().filter_map(|p| child(p, EntryKind::File)))
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        let inner = self.read()?;
        let bytes = inner
            .files
            .get(path)
            .ok_or_else(|| not_found(path, "No such file"))?;
        String::from_utf8(bytes.clone()).map_err(|_| not_found(path, "File is not valid UTF-8"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> StrataResult<()> {
        let mut inner = self.write()?;
        inner.require_parent(path)?;
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> StrataResult<()> {
        let mut inner = self.write()?;
        let bytes = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from, "No such file"))?;
        inner.require_parent(to)?;
        inner.files.insert(to.to_path_buf(), bytes);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> StrataResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path, "No such file"))
    }
}

fn not_found(path: &Path, reason: &str) -> StrataError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn lock_poisoned() -> StrataError {
    StrataError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_creates_parents() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/t/base/src/app.tsx", "x");

        assert!(fs.is_dir(Path::new("/t/base/src")));
        assert!(fs.is_dir(Path::new("/t")));
        assert_eq!(fs.read_file("/t/base/src/app.tsx").as_deref(), Some("x"));
    }

    #[test]
    fn read_dir_lists_direct_children_only() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/r/a.txt", "a").insert_file("/r/sub/b.txt", "b");

        let mut names: Vec<_> = fs
            .read_dir(Path::new("/r"))
            .unwrap()
            .into_iter()
            .map(|e| (e.file_name, e.kind))
            .collect();
        names.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(
            names,
            vec![
                ("a.txt".to_string(), EntryKind::File),
                ("sub".to_string(), EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/missing/f"), b"x").is_err());
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.insert_file("/x", "1");
        assert!(handle.exists(Path::new("/x")));
    }

    #[test]
    fn remove_missing_file_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs.remove_file(Path::new("/nope")).is_err());
    }
}
