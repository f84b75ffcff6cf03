//! Manifest Fragment Collector.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{application::ports::Filesystem, domain::FragmentKind, error::StrataResult};

enum Work {
    Visit(PathBuf),
    Emit(PathBuf),
}

/// Finds manifest fragments anywhere under a root.
///
/// Depth-first, with each directory's children visited in lexicographic
/// order, so the merge order is the same on every run and every platform.
pub struct FragmentCollector<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> FragmentCollector<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Ordered fragment paths; empty when the tree has none.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn collect(&self, root: &Path) -> StrataResult<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut stack = vec![Work::Visit(root.to_path_buf())];

        while let Some(work) = stack.pop() {
            match work {
                Work::Emit(path) => found.push(path),
                Work::Visit(dir) => {
                    let mut entries = self.fs.read_dir(&dir)?;
                    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

                    // Reversed so the smallest name is popped first.
                    for entry in entries.into_iter().rev() {
                        if entry.is_dir() {
                            stack.push(Work::Visit(entry.path));
                        } else if FragmentKind::classify(&entry.file_name).is_some() {
                            stack.push(Work::Emit(entry.path));
                        }
                    }
                }
            }
        }

        debug!(count = found.len(), "Manifest fragments collected");
        Ok(found)
    }
}
