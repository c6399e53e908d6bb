use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LocateError, Result};

/// One-level snapshot of a directory: its immediate subdirectories and files.
///
/// The two name sets are disjoint and together cover exactly the children
/// present at read time. A listing is never refreshed; callers re-read when
/// they need current state.
#[derive(Debug, Clone, PartialEq)]
pub struct DirListing {
    pub path: PathBuf,
    pub dirs: BTreeSet<String>,
    pub files: BTreeSet<String>,
}

impl DirListing {
    /// Read the immediate children of `path` and classify each as a
    /// directory or a file. Symlinks are classified by what they point at.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<DirListing> {
        let path = path.as_ref();

        let entries = fs::read_dir(path).map_err(|source| LocateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dirs = BTreeSet::new();
        let mut files = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| LocateError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.path().is_dir() {
                dirs.insert(name);
            } else {
                files.insert(name);
            }
        }

        Ok(DirListing {
            path: path.to_path_buf(),
            dirs,
            files,
        })
    }

    /// Base name of the listed directory, when it is valid UTF-8.
    pub fn base_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }
}

impl fmt::Display for DirListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} dirs, {} files)",
            self.path.display(),
            self.dirs.len(),
            self.files.len()
        )
    }
}
