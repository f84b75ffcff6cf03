//! Local filesystem adapter using std::fs.

use std::fs;
use std::path::Path;

use strata_core::{
    application::ports::{DirEntry, EntryKind, Filesystem},
    error::StrataResult,
};

use super::map_io_error;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_dir(&self, path: &Path) -> StrataResult<Vec<DirEntry>> {
        let entries = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            let entry_path = entry.path();
            // Follow symlinks so a linked directory is walked like a real one.
            let metadata =
                fs::metadata(&entry_path).map_err(|e| map_io_error(&entry_path, e, "stat"))?;
            out.push(DirEntry {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                kind: if metadata.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                path: entry_path,
            });
        }
        Ok(out)
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> StrataResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> StrataResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn remove_file(&self, path: &Path) -> StrataResult<()> {
        fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_dir_reports_kinds() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();

        let mut entries = LocalFilesystem.read_dir(tmp.path()).unwrap();
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name, "a.txt");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert!(entries[1].is_dir());
    }

    #[test]
    fn copy_overwrites_destination() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("from");
        let to = tmp.path().join("to");
        fs::write(&from, [0u8, 159, 146, 150]).unwrap();
        fs::write(&to, "old").unwrap();

        LocalFilesystem.copy_file(&from, &to).unwrap();

        assert_eq!(fs::read(&to).unwrap(), vec![0u8, 159, 146, 150]);
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .read_to_string(&tmp.path().join("nope"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
